//! Pipeline stage implementations.
//!
//! One function per stage, invoked by the scheduler in reverse stage
//! order. Each takes the record out of its slot, performs the stage's
//! work, and emits the record into the next cycle's latch map.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory_access;
pub mod write_back;
