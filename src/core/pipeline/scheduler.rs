//! Per-cycle pipeline state transition.
//!
//! One call to [`advance`] is one clock cycle. Stages are processed in
//! reverse order (WB, MEM, EX, DEC, IF) into a fresh latch map, so every
//! record observes the downstream slot it moves into already vacated, and
//! forwarding reads a snapshot of the dependency table taken before any
//! stage ran.

use crate::common::log::LogCode;
use crate::common::SimError;
use crate::core::pipeline::latches::{InstructionRecord, Latches, Stage};
use crate::core::stages;
use crate::core::Simulator;

/// Advances the pipeline by one cycle.
pub(crate) fn advance(sim: &mut Simulator) -> Result<(), SimError> {
    let snapshot = sim.deps.snapshot();
    let mut next = Latches::default();
    let mut progressed = false;

    for stage in Stage::REVERSE {
        let Some(rec) = sim.latches.take(stage) else {
            continue;
        };
        progressed = true;

        match stage {
            Stage::Writeback => stages::write_back::wb_stage(sim, rec)?,
            Stage::Memory => stages::memory_access::mem_stage(sim, rec, &mut next)?,
            Stage::Execute => stages::execute::execute_stage(sim, rec, &mut next, &snapshot)?,
            Stage::Decode => stages::decode::decode_stage(sim, rec, &mut next)?,
            Stage::Fetch => stages::fetch::fetch_stage(sim, rec, &mut next)?,
        }
    }

    // Seed the next instruction. Pipelined execution refills the fetch
    // slot whenever it is free; non-pipelined execution admits a new
    // record only once the previous one has fully retired.
    let slot_free = if sim.is_pipeline {
        !next.occupied(Stage::Fetch)
    } else {
        next.is_empty()
    };
    if sim.running && slot_free && sim.text.contains(sim.pc) {
        next.put(Stage::Fetch, InstructionRecord::new(sim.pc));
    }

    sim.latches = next;

    if sim.latches.is_empty() && !sim.text.is_empty() && !sim.text.contains(sim.pc) {
        sim.running = false;
    }

    if progressed {
        sim.stats.total_cycles += 1;
    }
    Ok(())
}

/// Squashes the fetch and decode slots after a mispredict, dropping any
/// dependency the squashed decode had registered.
pub(crate) fn flush_frontend(sim: &mut Simulator, reason: &str) {
    if !sim.is_pipeline {
        return;
    }
    for stage in [Stage::Fetch, Stage::Decode] {
        if let Some(squashed) = sim.latches.take(stage) {
            sim.deps.retire(squashed.pc);
        }
    }
    sim.stats.pipeline_flushes += 1;
    sim.response.is_flushed = true;
    sim.logs
        .push(LogCode::Trace, format!("Pipeline flushed: {}", reason));
}
