//! Instruction disassembler.
//!
//! Produces the assembler text stored alongside each word in the text
//! image and echoed in trace output.

use crate::common::SimError;
use crate::isa::decode::{self, InstrFormat, Mnemonic};

/// Renders an instruction word as assembler text.
///
/// Fails with the decoder's error for words that do not decode; a program
/// image containing such a word is rejected at load time.
pub fn disasm(word: u32) -> Result<String, SimError> {
    let d = decode::decode(word)?;
    let name = d.mnemonic.name();

    let text = match d.format {
        InstrFormat::R => format!("{} x{}, x{}, x{}", name, d.rd, d.rs1, d.rs2),
        InstrFormat::I => {
            if d.mnemonic.is_load() || d.mnemonic == Mnemonic::Jalr {
                format!("{} x{}, {}(x{})", name, d.rd, d.imm, d.rs1)
            } else {
                format!("{} x{}, x{}, {}", name, d.rd, d.rs1, d.imm)
            }
        }
        InstrFormat::S => format!("{} x{}, {}(x{})", name, d.rs2, d.imm, d.rs1),
        InstrFormat::Sb => format!("{} x{}, x{}, {}", name, d.rs1, d.rs2, d.imm),
        InstrFormat::U => format!("{} x{}, {:#x}", name, d.rd, (d.imm as u32) >> 12),
        InstrFormat::Uj => format!("{} x{}, {}", name, d.rd, d.imm),
    };
    Ok(text)
}
