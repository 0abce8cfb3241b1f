//! Simulation harness: machine image loading.

/// Machine image type and hex-listing parser.
pub mod loader;

pub use loader::MachineImage;
