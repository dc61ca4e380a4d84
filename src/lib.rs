pub mod binary;

pub use binary::{
    instruction::Instruction,
    module::ModuleDefinition,
    opcode::Opcode,
    types::{FunctionLocal, ModuleFunction, ValueType},
};
