use super::instruction::Instruction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    I32,       // 0x7F
    I64,       // 0x7E
    F32,       // 0x7D
    F64,       // 0x7C
    V128,      // 0x7B
    FuncRef,   // 0x70
    ExternRef, // 0x6F
}

impl From<ValueType> for u8 {
    fn from(value: ValueType) -> Self {
        match value {
            ValueType::I32 => 0x7F,
            ValueType::I64 => 0x7E,
            ValueType::F32 => 0x7D,
            ValueType::F64 => 0x7C,
            ValueType::V128 => 0x7B,
            ValueType::FuncRef => 0x70,
            ValueType::ExternRef => 0x6F,
        }
    }
}

/// A function signature. The format subset allows at most one result.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FuncType {
    pub params: Vec<ValueType>,
    pub result: Option<ValueType>,
}

/// A run-length entry in a code-section locals vector: `type_count`
/// consecutive locals of `value_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionLocal {
    #[serde(rename = "count")]
    pub type_count: u32,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDesc {
    Func(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub name: String,
    pub desc: ExportDesc,
}

/// One declared function of a module definition, as an external loader
/// hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleFunction {
    pub name: String,
    pub params: Vec<ValueType>,
    #[serde(default)]
    pub result: Option<ValueType>,
    #[serde(default)]
    pub locals: Vec<FunctionLocal>,
    pub code: Vec<Instruction>,
    #[serde(default)]
    pub export: bool,
}

impl ModuleFunction {
    pub fn func_type(&self) -> FuncType {
        FuncType {
            params: self.params.clone(),
            result: self.result,
        }
    }
}
