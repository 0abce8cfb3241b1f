//! Pipeline stage slots and the in-flight instruction record.
//!
//! Each stage owns at most one [`InstructionRecord`]; `None` denotes a
//! bubble. Records are moved between slots by value, never cloned or
//! aliased, and a record's `stage` field always names the slot it
//! occupies.

use serde::Serialize;

use crate::isa::Decoded;

/// The five pipeline stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Stage {
    Fetch,
    Decode,
    Execute,
    Memory,
    Writeback,
}

impl Stage {
    /// All stages in program order.
    pub const ALL: [Stage; 5] = [
        Stage::Fetch,
        Stage::Decode,
        Stage::Execute,
        Stage::Memory,
        Stage::Writeback,
    ];

    /// Stages in the order the scheduler processes them: downstream first,
    /// so each record moves into a slot that has already been vacated.
    pub const REVERSE: [Stage; 5] = [
        Stage::Writeback,
        Stage::Memory,
        Stage::Execute,
        Stage::Decode,
        Stage::Fetch,
    ];

    fn index(self) -> usize {
        match self {
            Stage::Fetch => 0,
            Stage::Decode => 1,
            Stage::Execute => 2,
            Stage::Memory => 3,
            Stage::Writeback => 4,
        }
    }
}

/// The inter-stage datapath registers carried with a record.
///
/// RA/RB hold the execute operands (RB is the immediate for I/S/SB/U/UJ
/// formats), RM the store value or branch comparand, RY the execute
/// result, and RZ the memory-stage result.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct InstructionRegisters {
    pub ra: u32,
    pub rb: u32,
    pub rm: u32,
    pub ry: u32,
    pub rz: u32,
}

/// A single in-flight instruction.
///
/// Created when a fetch slot is seeded, populated by the fetch and decode
/// stages, and destroyed when writeback retires it.
#[derive(Clone, Debug)]
pub struct InstructionRecord {
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// Raw instruction word. Zero until fetch completes.
    pub word: u32,
    /// Decoder output. `None` only while the record waits in the fetch slot.
    pub decoded: Option<Decoded>,
    /// The slot this record currently occupies.
    pub stage: Stage,
    /// Set when the record must re-attempt its stage next cycle.
    pub stalled: bool,
    /// Set once the record has been counted in the instruction statistics.
    pub counted: bool,
    /// True for conditional branches.
    pub is_branch: bool,
    /// True for JAL/JALR.
    pub is_jump: bool,
    /// Whether the predictor redirected fetch for this record.
    pub pred_taken: bool,
    /// The target the predictor redirected to, when it did.
    pub pred_target: Option<u32>,
    /// The record's datapath registers.
    pub regs: InstructionRegisters,
}

impl InstructionRecord {
    /// Creates a fresh record waiting to fetch from `pc`.
    pub fn new(pc: u32) -> Self {
        Self {
            pc,
            word: 0,
            decoded: None,
            stage: Stage::Fetch,
            stalled: false,
            counted: false,
            is_branch: false,
            is_jump: false,
            pred_taken: false,
            pred_target: None,
            regs: InstructionRegisters::default(),
        }
    }
}

/// The five per-stage slots.
#[derive(Default)]
pub struct Latches {
    slots: [Option<InstructionRecord>; 5],
}

impl Latches {
    /// Removes and returns the record occupying `stage`, if any.
    pub fn take(&mut self, stage: Stage) -> Option<InstructionRecord> {
        self.slots[stage.index()].take()
    }

    /// Places `rec` into `stage`, keeping its `stage` field consistent.
    pub fn put(&mut self, stage: Stage, mut rec: InstructionRecord) {
        rec.stage = stage;
        self.slots[stage.index()] = Some(rec);
    }

    /// Borrow of the record in `stage`, if any.
    pub fn get(&self, stage: Stage) -> Option<&InstructionRecord> {
        self.slots[stage.index()].as_ref()
    }

    /// True when `stage` holds a record.
    pub fn occupied(&self, stage: Stage) -> bool {
        self.slots[stage.index()].is_some()
    }

    /// Squashes the record in `stage`.
    pub fn clear_stage(&mut self, stage: Stage) {
        self.slots[stage.index()] = None;
    }

    /// True when every slot is a bubble.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    /// Empties all slots.
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}
