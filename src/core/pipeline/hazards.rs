//! Data hazard detection and register forwarding.
//!
//! A rolling table of in-flight destination registers drives both policies:
//! with forwarding enabled, execute-stage consumers pull operand values out
//! of the table (EX→EX from a producer's RY, MEM→EX from its RZ), stalling
//! only for the load-use case; with forwarding disabled, consumers stall in
//! decode until every producer they read has retired.

use crate::core::pipeline::latches::{InstructionRecord, Stage};
use crate::isa::{Decoded, InstrFormat};

/// One in-flight register write.
#[derive(Clone, Copy, Debug)]
pub struct RegisterDependency {
    /// Destination register. Never zero.
    pub reg: usize,
    /// PC of the producing instruction.
    pub pc: u32,
    /// Last pipeline stage the producer completed.
    pub stage: Stage,
    /// Whether the producer is a load (its value only exists after MEM).
    pub is_load: bool,
    /// The producer's result as of `stage`: RY after execute, RZ after
    /// memory. Zero while the producer is still in decode.
    pub value: u32,
}

/// Rolling table of in-flight destination registers.
///
/// Holds at most one entry per in-flight PC; with five stages the table
/// never exceeds four live entries, so lookups are linear scans.
#[derive(Default)]
pub struct DependencyTable {
    entries: Vec<RegisterDependency>,
}

impl DependencyTable {
    /// Registers a pending write at decode. Upserts on the PC so a decode
    /// that re-runs after a stall does not duplicate its entry.
    pub fn allocate(&mut self, pc: u32, reg: usize, is_load: bool) {
        if reg == 0 {
            return;
        }
        if let Some(dep) = self.entries.iter_mut().find(|d| d.pc == pc) {
            dep.reg = reg;
            dep.stage = Stage::Decode;
            dep.is_load = is_load;
        } else {
            self.entries.push(RegisterDependency {
                reg,
                pc,
                stage: Stage::Decode,
                is_load,
                value: 0,
            });
        }
    }

    /// Records stage completion for the producer at `pc`, latching the
    /// value available at that stage.
    pub fn advance(&mut self, pc: u32, stage: Stage, value: u32) {
        if let Some(dep) = self.entries.iter_mut().find(|d| d.pc == pc) {
            dep.stage = stage;
            dep.value = value;
        }
    }

    /// Drops the entry for a retiring producer.
    pub fn retire(&mut self, pc: u32) {
        self.entries.retain(|d| d.pc != pc);
    }

    /// Copy of the table for same-cycle forwarding reads.
    pub fn snapshot(&self) -> Vec<RegisterDependency> {
        self.entries.clone()
    }

    /// Borrow of the live entries.
    pub fn entries(&self) -> &[RegisterDependency] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Outcome of running the forwarding network for one consumer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardOutcome {
    /// At least one operand was taken from an in-flight producer.
    pub forwarded: bool,
    /// A source operand depends on a load still in execute; the consumer
    /// must stall one cycle.
    pub load_use: bool,
}

fn reads_rs1(format: InstrFormat) -> bool {
    matches!(
        format,
        InstrFormat::R | InstrFormat::I | InstrFormat::S | InstrFormat::Sb
    )
}

fn reads_rs2(format: InstrFormat) -> bool {
    matches!(format, InstrFormat::R | InstrFormat::S | InstrFormat::Sb)
}

/// Finds the in-flight producer of `reg` visible to a consumer entering
/// execute. A producer still in execute wins over one in memory; the
/// snapshot can hold at most one of each.
fn producer<'a>(
    snapshot: &'a [RegisterDependency],
    reg: usize,
    consumer_pc: u32,
) -> Option<&'a RegisterDependency> {
    if reg == 0 {
        return None;
    }
    let mut in_memory = None;
    for dep in snapshot {
        if dep.reg != reg || dep.pc == consumer_pc {
            continue;
        }
        match dep.stage {
            Stage::Execute => return Some(dep),
            Stage::Memory => in_memory = Some(dep),
            _ => {}
        }
    }
    in_memory
}

/// Applies the forwarding policy to a consumer entering execute.
///
/// Operand targets follow the datapath: RA carries rs1, RB carries rs2
/// only for R-type (it holds the immediate otherwise), and RM carries rs2
/// for stores and branches. A producer still in execute forwards its RY;
/// one in memory forwards its RZ. A load still in execute cannot forward
/// and raises the load-use flag instead.
pub fn forward_operands(
    rec: &mut InstructionRecord,
    d: &Decoded,
    snapshot: &[RegisterDependency],
) -> ForwardOutcome {
    let mut out = ForwardOutcome::default();
    let consumer_pc = rec.pc;

    let mut resolve = |reg: usize, slot: &mut u32| {
        if let Some(dep) = producer(snapshot, reg, consumer_pc) {
            if dep.stage == Stage::Execute && dep.is_load {
                out.load_use = true;
            } else {
                *slot = dep.value;
                out.forwarded = true;
            }
        }
    };

    let mut regs = rec.regs;
    if reads_rs1(d.format) {
        resolve(d.rs1, &mut regs.ra);
    }
    if d.format == InstrFormat::R {
        resolve(d.rs2, &mut regs.rb);
    }
    if matches!(d.format, InstrFormat::S | InstrFormat::Sb) {
        resolve(d.rs2, &mut regs.rm);
    }
    rec.regs = regs;
    out
}

/// True when, with forwarding disabled, the consumer reads a register some
/// in-flight producer has not yet retired. Checked against the live table
/// at decode.
pub fn has_raw_hazard(deps: &DependencyTable, d: &Decoded, consumer_pc: u32) -> bool {
    deps.entries().iter().any(|dep| {
        dep.pc != consumer_pc
            && matches!(dep.stage, Stage::Execute | Stage::Memory)
            && ((reads_rs1(d.format) && dep.reg == d.rs1)
                || (reads_rs2(d.format) && dep.reg == d.rs2))
    })
}
