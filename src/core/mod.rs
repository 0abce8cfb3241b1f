//! CPU core implementation.
//!
//! The architectural state, the five-stage pipeline with hazard handling
//! and branch prediction, and the simulator hub that ties them together.

/// Architectural register state.
pub mod arch;

/// Text and data images.
pub mod memory;

/// Pipeline latches, hazards, and the per-cycle scheduler.
pub mod pipeline;

/// The simulator hub and its observers.
pub mod simulator;

/// Pipeline stage implementations.
pub mod stages;

/// Execution units (ALU, branch predictor).
pub mod units;

pub use simulator::{Simulator, StageStatus, StepResponse};
