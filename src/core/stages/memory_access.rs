use crate::common::SimError;
use crate::core::pipeline::latches::{InstructionRecord, Latches, Stage};
use crate::core::Simulator;
use crate::isa::Mnemonic;

pub fn mem_stage(
    sim: &mut Simulator,
    mut rec: InstructionRecord,
    next: &mut Latches,
) -> Result<(), SimError> {
    let Some(d) = rec.decoded else {
        return Ok(());
    };

    let addr = rec.regs.ry;
    rec.regs.rz = rec.regs.ry;

    match d.mnemonic {
        Mnemonic::Lb => {
            rec.regs.rz = sim.data.read_u8(addr)? as i8 as i32 as u32;
        }
        Mnemonic::Lh => {
            rec.regs.rz = sim.data.read_u16(addr)? as i16 as i32 as u32;
        }
        Mnemonic::Lw => {
            rec.regs.rz = sim.data.read_u32(addr)?;
        }
        Mnemonic::Sb => {
            sim.data.write_u8(addr, rec.regs.rm as u8)?;
        }
        Mnemonic::Sh => {
            sim.data.write_u16(addr, rec.regs.rm as u16)?;
        }
        Mnemonic::Sw => {
            sim.data.write_u32(addr, rec.regs.rm)?;
        }
        _ => {}
    }

    if sim.trace {
        if d.mnemonic.is_load() {
            eprintln!("MEM pc={:#x} LOAD addr={:#x} rz={:#x}", rec.pc, addr, rec.regs.rz);
        } else if d.mnemonic.is_store() {
            eprintln!("MEM pc={:#x} STORE addr={:#x} data={:#x}", rec.pc, addr, rec.regs.rm);
        }
    }

    sim.deps.advance(rec.pc, Stage::Memory, rec.regs.rz);
    sim.datapath.rz = rec.regs.rz;

    next.put(Stage::Writeback, rec);
    Ok(())
}
