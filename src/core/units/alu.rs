//! Integer ALU and branch condition evaluation.

use crate::isa::Mnemonic;

/// Computes an ALU result. All arithmetic wraps mod 2^32; shifts use the
/// low five bits of `b`; division by zero yields 0xFFFF_FFFF and
/// remainder by zero yields the dividend, per the RISC-V M convention.
pub fn alu(m: Mnemonic, a: u32, b: u32) -> u32 {
    match m {
        Mnemonic::Add | Mnemonic::Addi => a.wrapping_add(b),
        Mnemonic::Sub => a.wrapping_sub(b),
        Mnemonic::Mul => a.wrapping_mul(b),
        Mnemonic::Div => {
            if b == 0 {
                0xffff_ffff
            } else {
                (a as i32).wrapping_div(b as i32) as u32
            }
        }
        Mnemonic::Rem => {
            if b == 0 {
                a
            } else {
                (a as i32).wrapping_rem(b as i32) as u32
            }
        }
        Mnemonic::And | Mnemonic::Andi => a & b,
        Mnemonic::Or | Mnemonic::Ori => a | b,
        Mnemonic::Xor | Mnemonic::Xori => a ^ b,
        Mnemonic::Sll | Mnemonic::Slli => a.wrapping_shl(b & 0x1f),
        Mnemonic::Srl | Mnemonic::Srli => a.wrapping_shr(b & 0x1f),
        Mnemonic::Sra | Mnemonic::Srai => ((a as i32) >> (b & 0x1f)) as u32,
        Mnemonic::Slt | Mnemonic::Slti => (((a as i32) < (b as i32)) as u32),
        Mnemonic::Sltiu => ((a < b) as u32),
        _ => 0,
    }
}

/// Evaluates a conditional branch. BLT/BGE compare signed, BLTU/BGEU
/// unsigned.
pub fn branch_taken(m: Mnemonic, a: u32, b: u32) -> bool {
    match m {
        Mnemonic::Beq => a == b,
        Mnemonic::Bne => a != b,
        Mnemonic::Blt => (a as i32) < (b as i32),
        Mnemonic::Bge => (a as i32) >= (b as i32),
        Mnemonic::Bltu => a < b,
        Mnemonic::Bgeu => a >= b,
        _ => false,
    }
}
