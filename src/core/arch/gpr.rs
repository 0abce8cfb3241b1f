//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file, containing
//! 32 registers (x0-x31). It enforces the architectural invariant that
//! register x0 is always hardwired to zero.

use crate::common::constants::{GLOBAL_POINTER, NUM_REGISTERS, STACK_TOP};

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers (x0-x31). Register x0 is
/// hardwired to zero and cannot be modified.
pub struct RegisterFile {
    regs: [u32; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a register file in the documented power-on state:
    /// x2 (sp) and x11 (a1) point at the top of the stack, x3 (gp) at the
    /// data segment, x10 (a0) holds 1, everything else is zero.
    pub fn new() -> Self {
        let mut rf = Self {
            regs: [0; NUM_REGISTERS],
        };
        rf.reset();
        rf
    }

    /// Restores the power-on register values.
    pub fn reset(&mut self) {
        self.regs = [0; NUM_REGISTERS];
        self.regs[2] = STACK_TOP;
        self.regs[3] = GLOBAL_POINTER;
        self.regs[10] = 1;
        self.regs[11] = STACK_TOP;
    }

    /// Reads a register. x0 always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a register. Writes to x0 are silently ignored.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns the full register array for state observers.
    pub fn snapshot(&self) -> [u32; NUM_REGISTERS] {
        self.regs
    }

    /// Dumps the contents of all registers to stdout, two per line.
    pub fn dump(&self) {
        for i in (0..NUM_REGISTERS).step_by(2) {
            println!(
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
