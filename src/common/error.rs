//! Simulator error definitions.
//!
//! All fatal conditions a running program can raise are collected in
//! [`SimError`]. The scheduler converts them into log entries (code 404)
//! and halts the pipeline; they never escape `step()` as a panic.

use thiserror::Error;

use super::constants::MEMORY_SIZE;

/// Fatal simulation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The fetched word does not match any known opcode/funct combination.
    #[error("instruction {word:#010x} could not be classified: invalid opcode ({opcode:#04x})")]
    UnknownInstruction {
        /// The raw instruction word.
        word: u32,
        /// The low seven opcode bits.
        opcode: u32,
    },

    /// A recognized encoding the integer core does not implement (e.g. `ld`).
    #[error("{0} instruction not supported")]
    Unsupported(&'static str),

    /// A data access fell outside the simulated address space.
    #[error(
        "memory access error: address {addr:#010x} with size {size} is outside of valid memory range (0x0-{limit:#x})",
        limit = MEMORY_SIZE
    )]
    MemoryRange {
        /// Starting address of the access.
        addr: u32,
        /// Access width in bytes.
        size: u32,
    },

    /// The program counter left the valid address range during fetch.
    #[error("fetch error: invalid PC address {0:#010x}")]
    FetchOutOfRange(u32),

    /// A machine image line could not be parsed.
    #[error("malformed image line {line}: {reason}")]
    MalformedImage {
        /// One-based line number in the listing.
        line: usize,
        /// Human-readable cause.
        reason: String,
    },

    /// The supplied machine image contained no text words.
    #[error("empty program image")]
    EmptyProgram,
}
