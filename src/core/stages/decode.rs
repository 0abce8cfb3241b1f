use crate::common::SimError;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{InstructionRecord, Latches, Stage};
use crate::core::Simulator;
use crate::isa::InstrFormat;

/// Reads the operand registers for `d` into the record's RA/RB/RM.
///
/// RA carries rs1 for every register-reading format. RB carries rs2 only
/// for R-type and the sign-extended immediate otherwise. RM carries rs2
/// for stores (the value to write) and branches (the comparand).
pub(crate) fn read_operands(sim: &Simulator, rec: &mut InstructionRecord) {
    let Some(d) = rec.decoded else {
        return;
    };
    rec.regs.ra = match d.format {
        InstrFormat::R | InstrFormat::I | InstrFormat::S | InstrFormat::Sb => sim.regs.read(d.rs1),
        InstrFormat::U | InstrFormat::Uj => 0,
    };
    rec.regs.rb = match d.format {
        InstrFormat::R => sim.regs.read(d.rs2),
        _ => d.imm as u32,
    };
    if matches!(d.format, InstrFormat::S | InstrFormat::Sb) {
        rec.regs.rm = sim.regs.read(d.rs2);
    }
}

pub fn decode_stage(
    sim: &mut Simulator,
    mut rec: InstructionRecord,
    next: &mut Latches,
) -> Result<(), SimError> {
    let Some(d) = rec.decoded else {
        return Ok(());
    };

    if !rec.counted {
        rec.counted = true;
        sim.stats.instructions_executed += 1;
        if d.mnemonic.is_load() || d.mnemonic.is_store() {
            sim.stats.data_transfer_instructions += 1;
        } else if rec.is_branch || rec.is_jump {
            sim.stats.control_instructions += 1;
        } else {
            sim.stats.alu_instructions += 1;
        }
    }

    read_operands(sim, &mut rec);

    if matches!(d.format, InstrFormat::R | InstrFormat::I | InstrFormat::U | InstrFormat::Uj)
        && d.rd != 0
    {
        sim.deps.allocate(rec.pc, d.rd, d.mnemonic.is_load());
    }

    if sim.trace {
        eprintln!(
            "ID  pc={:#x} rs1=x{} ra={:#x} rs2=x{} rd=x{} imm={}",
            rec.pc, d.rs1, rec.regs.ra, d.rs2, d.rd, d.imm
        );
    }

    if sim.is_pipeline && !sim.is_forwarding && hazards::has_raw_hazard(&sim.deps, &d, rec.pc) {
        rec.stalled = true;
        sim.stats.stall_bubbles += 1;
        sim.stats.data_hazards += 1;
        sim.stats.data_hazard_stalls += 1;
        sim.response.is_stalled = true;
        next.put(Stage::Decode, rec);
        return Ok(());
    }
    rec.stalled = false;

    // A load-use stall upstream keeps its consumer in the execute slot;
    // hold here until it drains.
    if next.occupied(Stage::Execute) {
        next.put(Stage::Decode, rec);
        return Ok(());
    }

    sim.datapath.ra = rec.regs.ra;
    sim.datapath.rb = rec.regs.rb;
    sim.datapath.rm = rec.regs.rm;

    next.put(Stage::Execute, rec);
    Ok(())
}
