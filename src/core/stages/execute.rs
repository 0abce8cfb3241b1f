use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::SimError;
use crate::core::pipeline::hazards::{self, RegisterDependency};
use crate::core::pipeline::latches::{InstructionRecord, Latches, Stage};
use crate::core::pipeline::scheduler;
use crate::core::stages::decode::read_operands;
use crate::core::units::alu::{alu, branch_taken};
use crate::core::Simulator;
use crate::isa::{InstrFormat, Mnemonic};

pub fn execute_stage(
    sim: &mut Simulator,
    mut rec: InstructionRecord,
    next: &mut Latches,
    snapshot: &[RegisterDependency],
) -> Result<(), SimError> {
    let Some(d) = rec.decoded else {
        return Ok(());
    };

    // Operands are refreshed from the register file on every attempt, so a
    // record that sat out a stall sees values committed in the meantime.
    // In-flight producers override through the forwarding network below.
    read_operands(sim, &mut rec);

    if sim.is_pipeline && sim.is_forwarding {
        let outcome = hazards::forward_operands(&mut rec, &d, snapshot);
        if outcome.forwarded {
            sim.response.is_data_forwarded = true;
        }
        if outcome.load_use {
            rec.stalled = true;
            sim.stats.stall_bubbles += 1;
            sim.stats.data_hazards += 1;
            sim.stats.data_hazard_stalls += 1;
            sim.response.is_stalled = true;
            next.put(Stage::Execute, rec);
            return Ok(());
        }
    }
    rec.stalled = false;

    let ra = rec.regs.ra;
    let rb = rec.regs.rb;
    let rm = rec.regs.rm;
    let link = rec.pc.wrapping_add(INSTRUCTION_SIZE);

    // (taken, target) for control-flow instructions, None otherwise.
    let mut resolved: Option<(bool, u32)> = None;

    rec.regs.ry = match d.format {
        InstrFormat::R => alu(d.mnemonic, ra, rb),
        InstrFormat::I => match d.mnemonic {
            Mnemonic::Lb | Mnemonic::Lh | Mnemonic::Lw => ra.wrapping_add(rb),
            Mnemonic::Jalr => {
                resolved = Some((true, ra.wrapping_add(d.imm as u32) & !1));
                link
            }
            _ => alu(d.mnemonic, ra, rb),
        },
        InstrFormat::S => ra.wrapping_add(rb),
        InstrFormat::Sb => {
            let taken = branch_taken(d.mnemonic, ra, rm);
            resolved = Some((taken, rec.pc.wrapping_add(d.imm as u32)));
            taken as u32
        }
        InstrFormat::U => match d.mnemonic {
            Mnemonic::Auipc => rec.pc.wrapping_add(rb),
            _ => rb,
        },
        InstrFormat::Uj => {
            resolved = Some((true, rec.pc.wrapping_add(d.imm as u32)));
            link
        }
    };

    sim.deps.advance(rec.pc, Stage::Execute, rec.regs.ry);

    sim.datapath.ra = rec.regs.ra;
    sim.datapath.rb = rec.regs.rb;
    sim.datapath.rm = rec.regs.rm;
    sim.datapath.ry = rec.regs.ry;

    if sim.trace {
        eprintln!("EX  pc={:#x} ra={:#x} rb={:#x} ry={:#x}", rec.pc, ra, rb, rec.regs.ry);
    }

    if let Some((taken, target)) = resolved {
        if sim.is_pipeline {
            sim.predictor.update(rec.pc, taken, Some(target));

            let mispredicted = if taken {
                !rec.pred_taken || rec.pred_target != Some(target)
            } else {
                rec.pred_taken
            };

            if mispredicted {
                sim.predictor.mispredictions += 1;
                sim.stats.control_hazards += 1;
                sim.stats.control_hazard_stalls += 2;
                scheduler::flush_frontend(sim, "control hazard - branch/jump resolved against prediction");
                sim.pc = if taken { target } else { link };
            }
        } else if taken {
            sim.pc = target;
        }
    }

    next.put(Stage::Memory, rec);
    Ok(())
}
