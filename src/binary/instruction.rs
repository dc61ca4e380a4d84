use super::opcode::Opcode;
use serde::{Deserialize, Serialize};

/// One body instruction: a mnemonic resolved against the opcode table,
/// or a raw byte passed through unchanged. Raw bytes let callers spell
/// out an opcode plus its immediates when the mnemonic table has no
/// immediate-aware entry.
///
/// An unknown mnemonic cannot be constructed at all: deserialization
/// rejects it before a definition ever reaches the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instruction {
    Raw(u8),
    Op(Opcode),
}

impl Instruction {
    pub fn byte(self) -> u8 {
        match self {
            Instruction::Raw(byte) => byte,
            Instruction::Op(opcode) => opcode.into(),
        }
    }
}
