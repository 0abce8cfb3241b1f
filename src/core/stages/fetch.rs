use crate::common::constants::{INSTRUCTION_SIZE, MEMORY_SIZE};
use crate::common::SimError;
use crate::core::pipeline::latches::{InstructionRecord, Latches, Stage};
use crate::core::Simulator;
use crate::isa;

pub fn fetch_stage(
    sim: &mut Simulator,
    mut rec: InstructionRecord,
    next: &mut Latches,
) -> Result<(), SimError> {
    // A stalled decode (or a stall further down) blocks the front end.
    if next.occupied(Stage::Decode) {
        next.put(Stage::Fetch, rec);
        return Ok(());
    }

    if sim
        .pc
        .checked_add(INSTRUCTION_SIZE)
        .map_or(true, |end| end > MEMORY_SIZE)
    {
        return Err(SimError::FetchOutOfRange(sim.pc));
    }

    let Some(text) = sim.text.get(sim.pc) else {
        // Fetch ran past the end of the text image: the record dissolves
        // and the pipeline drains.
        return Ok(());
    };
    let word = text.word;

    if sim.trace {
        eprintln!("IF  pc={:#x} inst={:#010x} {}", sim.pc, word, text.disasm);
    }

    let d = isa::decode(word)?;
    rec.pc = sim.pc;
    rec.word = word;
    rec.is_branch = d.mnemonic.is_branch();
    rec.is_jump = d.mnemonic.is_jump();
    rec.decoded = Some(d);

    let mut next_pc = sim.pc.wrapping_add(INSTRUCTION_SIZE);

    if sim.is_pipeline && (rec.is_branch || rec.is_jump) {
        sim.predictor.predictions += 1;
        let redirect = if rec.is_branch {
            sim.predictor
                .predict_taken(sim.pc)
                .then(|| sim.predictor.predict_target(sim.pc))
                .flatten()
        } else {
            sim.predictor.predict_target(sim.pc)
        };
        if let Some(target) = redirect {
            next_pc = target;
            rec.pred_taken = true;
            rec.pred_target = Some(target);
        }
    }

    sim.pc = next_pc;
    next.put(Stage::Decode, rec);
    Ok(())
}
