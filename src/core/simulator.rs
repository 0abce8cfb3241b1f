//! The simulator hub.
//!
//! [`Simulator`] owns every piece of machine state: the register file,
//! text and data images, the pipeline latches, the dependency table, the
//! branch predictor, statistics, and the log channel. Hosts drive it with
//! `step()`/`run()` and read state back through the observer methods; all
//! shared mutation happens inside the per-cycle scheduler.

use serde::Serialize;

use crate::common::constants::TEXT_BASE;
use crate::common::log::{LogChannel, LogCode, LogEntry};
use crate::common::SimError;
use crate::config::Config;
use crate::core::arch::RegisterFile;
use crate::core::memory::{DataImage, TextImage};
use crate::core::pipeline::latches::{InstructionRecord, InstructionRegisters, Latches, Stage};
use crate::core::pipeline::{scheduler, DependencyTable};
use crate::core::units::bp::BranchPredictor;
use crate::isa;
use crate::sim::loader::MachineImage;
use crate::stats::SimStats;

/// Host-visible status of the most recent `step()`.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StepResponse {
    /// A stall held at least one record in place this cycle.
    pub is_stalled: bool,
    /// A mispredict squashed the front end this cycle.
    pub is_flushed: bool,
    /// The forwarding network supplied at least one operand this cycle.
    pub is_data_forwarded: bool,
    /// The program has fully retired (or an error halted it).
    pub is_program_terminated: bool,
}

/// Occupancy of one pipeline stage, for state observers.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StageStatus {
    pub stage: Stage,
    pub active: bool,
    pub pc: u32,
}

/// A complete RV32I/M pipeline simulator instance.
pub struct Simulator {
    pub(crate) regs: RegisterFile,
    pub(crate) pc: u32,
    pub(crate) text: TextImage,
    pub(crate) data: DataImage,
    pub(crate) latches: Latches,
    pub(crate) deps: DependencyTable,
    pub(crate) predictor: BranchPredictor,
    pub(crate) stats: SimStats,
    pub(crate) logs: LogChannel,
    pub(crate) running: bool,
    pub(crate) is_pipeline: bool,
    pub(crate) is_forwarding: bool,
    pub(crate) trace: bool,
    pub(crate) max_steps: u32,
    pub(crate) datapath: InstructionRegisters,
    pub(crate) response: StepResponse,
}

impl Simulator {
    /// Builds a simulator from a configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: TEXT_BASE,
            text: TextImage::default(),
            data: DataImage::default(),
            latches: Latches::default(),
            deps: DependencyTable::default(),
            predictor: BranchPredictor::new(
                config.pipeline.predictor_kind(),
                config.pipeline.pht_size,
                config.pipeline.btb_size,
            ),
            stats: SimStats::default(),
            logs: LogChannel::default(),
            running: false,
            is_pipeline: config.pipeline.enabled,
            is_forwarding: config.pipeline.data_forwarding,
            trace: config.general.trace_instructions,
            max_steps: config.general.max_steps,
            datapath: InstructionRegisters::default(),
            response: StepResponse::default(),
        }
    }

    /// Switches pipelining and forwarding before the next run. Toggling
    /// between runs is supported; toggling mid-run is not.
    pub fn set_environment(&mut self, pipeline: bool, forwarding: bool) {
        self.is_pipeline = pipeline;
        self.is_forwarding = forwarding;
    }

    /// Restores power-on state. Mode switches and the predictor
    /// configuration survive; everything learned or loaded does not.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.pc = TEXT_BASE;
        self.text.clear();
        self.data.clear();
        self.latches.clear();
        self.deps.clear();
        self.predictor.reset();
        self.stats = SimStats::default();
        self.logs.clear();
        self.running = false;
        self.datapath = InstructionRegisters::default();
        self.response = StepResponse::default();
    }

    /// Installs a finished machine image and arms the pipeline.
    ///
    /// Words below the data segment populate the text image together with
    /// their disassembly; entries at or above it contribute data bytes.
    /// Returns `false` (with the cause in the log channel) when the image
    /// is empty, contains an undecodable text word, or writes outside the
    /// memory range.
    pub fn load_program(&mut self, image: &MachineImage) -> bool {
        self.reset();

        for &(addr, value) in image.entries() {
            if addr >= crate::common::constants::DATA_BASE {
                if let Err(e) = self.data.write_u8(addr, value as u8) {
                    self.logs.push(LogCode::Error, format!("Error: {}", e));
                    return false;
                }
            } else {
                match isa::disasm(value) {
                    Ok(text) => self.text.insert(addr, value, text),
                    Err(e) => {
                        self.logs.push(LogCode::Warning, e.to_string());
                        self.logs.push(LogCode::Error, format!("Error: {}", e));
                        return false;
                    }
                }
            }
        }

        if self.text.is_empty() {
            self.logs.push(LogCode::Trace, "Empty Code");
            return false;
        }

        self.pc = TEXT_BASE;
        self.running = true;
        self.latches.put(Stage::Fetch, InstructionRecord::new(self.pc));
        self.logs.push(LogCode::Info, "Program loaded successfully");
        true
    }

    /// Advances one cycle. Returns `false` once the program has fully
    /// retired or an error halted it; the first call after natural
    /// termination also returns `false`, without error.
    pub fn step(&mut self) -> bool {
        self.response = StepResponse::default();

        if !self.running && self.latches.is_empty() {
            self.logs
                .push(LogCode::Error, "Cannot step - simulator is not running");
            self.response.is_program_terminated = true;
            return false;
        }

        match scheduler::advance(self) {
            Ok(()) => {
                let done = !self.running && self.latches.is_empty();
                self.response.is_program_terminated = done;
                !done
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    /// Converts a fatal error into log entries and halts the machine.
    fn fail(&mut self, e: SimError) {
        match &e {
            SimError::MemoryRange { .. } => self.logs.push(LogCode::Trace, e.to_string()),
            _ => self.logs.push(LogCode::Warning, e.to_string()),
        }
        self.logs.push(
            LogCode::Error,
            format!("Runtime error during step execution: {}", e),
        );
        self.running = false;
        self.latches.clear();
        self.deps.clear();
        self.response.is_program_terminated = true;
    }

    /// Steps until the program retires, an error halts it, or the step
    /// cap is exceeded.
    pub fn run(&mut self) {
        if !self.running && self.latches.is_empty() {
            self.logs
                .push(LogCode::Error, "Cannot run - simulator is not running");
            return;
        }

        let mut steps: u32 = 0;
        while self.step() {
            steps += 1;
            if steps > self.max_steps {
                self.logs.push(
                    LogCode::Warning,
                    format!(
                        "Program execution terminated - exceeded maximum step count ({})",
                        self.max_steps
                    ),
                );
                break;
            }
        }

        self.logs.push(
            LogCode::Info,
            format!(
                "Simulation completed. Total clock cycles: {}, Total steps executed: {}",
                self.stats.total_cycles, steps
            ),
        );
    }

    /// True while the program still has instructions to fetch or retire.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Snapshot of the 32 general-purpose registers.
    pub fn registers(&self) -> [u32; 32] {
        self.regs.snapshot()
    }

    /// Borrow of the data image's byte map.
    pub fn data_image(&self) -> &std::collections::HashMap<u32, u8> {
        self.data.bytes()
    }

    /// Borrow of the text image.
    pub fn text_image(&self) -> &TextImage {
        &self.text
    }

    /// Cycles executed so far.
    pub fn cycles(&self) -> u64 {
        self.stats.total_cycles
    }

    /// Stall bubbles inserted so far.
    pub fn stalls(&self) -> u64 {
        self.stats.stall_bubbles
    }

    /// Per-stage occupancy with the PC of the occupying record.
    pub fn active_stages(&self) -> Vec<StageStatus> {
        Stage::ALL
            .iter()
            .map(|&stage| {
                let rec = self.latches.get(stage);
                StageStatus {
                    stage,
                    active: rec.is_some(),
                    pc: rec.map_or(0, |r| r.pc),
                }
            })
            .collect()
    }

    /// The RA/RB/RM/RY/RZ datapath snapshot as of the last cycle.
    pub fn instruction_registers(&self) -> InstructionRegisters {
        self.datapath
    }

    /// Cumulative statistics.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Branch predictor state (tables and counters).
    pub fn predictor(&self) -> &BranchPredictor {
        &self.predictor
    }

    /// Returns and clears the accumulated log entries.
    pub fn drain_logs(&mut self) -> Vec<LogEntry> {
        self.logs.drain()
    }

    /// Status flags of the most recent `step()`.
    pub fn ui_response(&self) -> StepResponse {
        self.response
    }
}
