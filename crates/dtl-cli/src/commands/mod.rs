pub mod convert;
pub mod opcodes;
