//! Simulation statistics collection and reporting.
//!
//! Tracks cycle and instruction counts, hazard and stall breakdowns, and
//! the derived CPI for a single run.

use std::time::Instant;

use serde::Serialize;

/// Simulation statistics structure tracking all performance metrics.
///
/// All counters are monotonic over a run; `reset()`/`load_program` replace
/// the whole structure.
#[derive(Clone, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub total_cycles: u64,
    /// Instructions counted at decode (squashed instructions included).
    pub instructions_executed: u64,

    /// Bubbles inserted by stalls of any kind.
    pub stall_bubbles: u64,
    /// Data hazard occurrences (one per stalled cycle).
    pub data_hazards: u64,
    /// Control hazard occurrences (one per mispredict).
    pub control_hazards: u64,
    /// Stall cycles attributable to data hazards.
    pub data_hazard_stalls: u64,
    /// Stall cycles attributable to control hazards (two per flush).
    pub control_hazard_stalls: u64,
    /// Front-end flushes after mispredicts.
    pub pipeline_flushes: u64,

    /// Loads and stores decoded.
    pub data_transfer_instructions: u64,
    /// ALU-class instructions decoded (including LUI/AUIPC).
    pub alu_instructions: u64,
    /// Branches and jumps decoded.
    pub control_instructions: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            total_cycles: 0,
            instructions_executed: 0,
            stall_bubbles: 0,
            data_hazards: 0,
            control_hazards: 0,
            data_hazard_stalls: 0,
            control_hazard_stalls: 0,
            pipeline_flushes: 0,
            data_transfer_instructions: 0,
            alu_instructions: 0,
            control_instructions: 0,
        }
    }
}

impl SimStats {
    /// Cycles per instruction. 0.0 before anything has decoded.
    pub fn cpi(&self) -> f64 {
        if self.instructions_executed == 0 {
            0.0
        } else {
            self.total_cycles as f64 / self.instructions_executed as f64
        }
    }

    /// Prints a formatted summary of the run.
    pub fn print(&self, predictions: u64, mispredictions: u64) {
        let duration = self.start_time.elapsed();
        let seconds = duration.as_secs_f64();

        let instr = self.instructions_executed.max(1);

        println!("\n==========================================================");
        println!("RV32 PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.total_cycles);
        println!("sim_insts                {}", self.instructions_executed);
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("----------------------------------------------------------");
        println!("HAZARDS AND STALLS");
        println!("  stall.bubbles          {}", self.stall_bubbles);
        println!(
            "  hazards.data           {} ({} stall cycles)",
            self.data_hazards, self.data_hazard_stalls
        );
        println!(
            "  hazards.control        {} ({} stall cycles)",
            self.control_hazards, self.control_hazard_stalls
        );
        println!("  flushes                {}", self.pipeline_flushes);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        let total = instr as f64;
        println!(
            "  op.alu                 {} ({:.2}%)",
            self.alu_instructions,
            (self.alu_instructions as f64 / total) * 100.0
        );
        println!(
            "  op.data_transfer       {} ({:.2}%)",
            self.data_transfer_instructions,
            (self.data_transfer_instructions as f64 / total) * 100.0
        );
        println!(
            "  op.control             {} ({:.2}%)",
            self.control_instructions,
            (self.control_instructions as f64 / total) * 100.0
        );
        println!("----------------------------------------------------------");
        println!("BRANCH PREDICTION");
        let accuracy = if predictions > 0 {
            100.0 * (1.0 - mispredictions as f64 / predictions as f64)
        } else {
            0.0
        };
        println!("  bp.lookups             {}", predictions);
        println!("  bp.mispredicts         {}", mispredictions);
        println!("  bp.accuracy            {:.2}%", accuracy);
        println!("==========================================================");
    }
}
