//! Memory layout and execution limits.

/// Base address of the text segment. Fetch starts here after a program load.
pub const TEXT_BASE: u32 = 0x0000_0000;

/// Base address of the data segment. Image words at or above this address
/// populate the data image instead of the text image.
pub const DATA_BASE: u32 = 0x1000_0000;

/// Exclusive upper bound of the simulated address space.
pub const MEMORY_SIZE: u32 = 0x8000_0000;

/// Width of every instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// Hard cap on the number of cycles a single `run()` may execute.
pub const MAX_STEPS: u32 = 100_000;

/// Boot value of x2 (sp) and x11 (a1).
pub const STACK_TOP: u32 = 0x7FFF_FFDC;

/// Boot value of x3 (gp): the start of the data segment.
pub const GLOBAL_POINTER: u32 = DATA_BASE;
