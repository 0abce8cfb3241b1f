use crate::common::SimError;
use crate::core::pipeline::latches::InstructionRecord;
use crate::core::Simulator;
use crate::isa::InstrFormat;

pub fn wb_stage(sim: &mut Simulator, rec: InstructionRecord) -> Result<(), SimError> {
    let Some(d) = rec.decoded else {
        return Ok(());
    };

    if matches!(
        d.format,
        InstrFormat::R | InstrFormat::I | InstrFormat::U | InstrFormat::Uj
    ) && d.rd != 0
    {
        sim.regs.write(d.rd, rec.regs.rz);
        if sim.trace {
            eprintln!("WB  pc={:#x} x{} <= {:#x}", rec.pc, d.rd, rec.regs.rz);
        }
    } else if sim.trace {
        eprintln!("WB  pc={:#x}", rec.pc);
    }

    // x0 stays hardwired to zero regardless of what retired.
    sim.regs.write(0, 0);

    sim.deps.retire(rec.pc);
    Ok(())
}
