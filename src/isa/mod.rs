//! Instruction Set Architecture definitions.
//!
//! Encoding constants, the decoder, and the disassembler for the RV32I/M
//! integer subset the pipeline executes.

/// Base opcode constants.
pub mod opcodes;

/// funct3 field constants.
pub mod funct3;

/// funct7 field constants.
pub mod funct7;

/// Instruction classification and field extraction.
pub mod decode;

/// Assembler-text rendering of instruction words.
pub mod disasm;

pub use decode::{decode, Decoded, InstrFormat, Mnemonic};
pub use disasm::disasm;
