//! Common types shared across the simulator.
//!
//! This module provides the memory layout constants, the error enum, and
//! the severity-coded log channel used by every other component.

/// Memory layout constants and execution limits.
pub mod constants;

/// Error types for fatal simulation conditions.
pub mod error;

/// Per-simulator log channel with severity codes.
pub mod log;

pub use constants::{DATA_BASE, INSTRUCTION_SIZE, MAX_STEPS, MEMORY_SIZE, TEXT_BASE};
pub use error::SimError;
pub use log::{LogChannel, LogCode, LogEntry};
