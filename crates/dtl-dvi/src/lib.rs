//! DVI binary format for the DTL transcoders.
//!
//! This crate contains:
//! - Big-endian integer fields of 1 to 4 bytes (signed and unsigned)
//! - Format constants (opcode ranges, padding byte, file alignment)
//! - The 256-entry opcode table with mnemonics and argument signatures

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod codec;
pub mod constants;
pub mod opcodes;

#[cfg(test)]
mod codec_tests;

// Re-export commonly used items at crate root
pub use codec::{
    CodecError, MAX_WIDTH, max_unsigned, read_signed, read_unsigned, write_signed, write_unsigned,
};
pub use opcodes::{ArgSpec, CommandKind, OpcodeDescriptor, OpcodeTable, TableError, signature};
