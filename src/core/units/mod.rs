//! Execution units.

/// Integer ALU and branch comparisons.
pub mod alu;

/// Branch predictor (PHT + BTB).
pub mod bp;
