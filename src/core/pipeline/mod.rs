//! Five-stage in-order pipeline.
//!
//! This module contains the stage slots and instruction records, the
//! dependency table with hazard detection and forwarding, and the
//! per-cycle scheduler.

/// Hazard detection, forwarding, and the in-flight dependency table.
pub mod hazards;

/// Stage slots and the in-flight instruction record.
pub mod latches;

/// The per-cycle state transition and mispredict flush.
pub(crate) mod scheduler;

pub use hazards::{DependencyTable, ForwardOutcome, RegisterDependency};
pub use latches::{InstructionRecord, InstructionRegisters, Latches, Stage};
