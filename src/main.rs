//! RV32 Pipeline Simulator CLI.
//!
//! Loads a TOML configuration and a machine-code hex listing, runs the
//! program to completion, and prints the run statistics.

use clap::Parser;
use std::{fs, process};

extern crate rv32sim;

use rv32sim::config::Config;
use rv32sim::core::Simulator;
use rv32sim::sim::MachineImage;

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "RV32 Cycle-Accurate Pipeline Simulator")]
struct Args {
    #[arg(short, long, default_value = "configs/default.toml")]
    config: String,

    /// Machine-code hex listing (`address: value` per line).
    #[arg(short, long)]
    file: String,

    /// Disable the pipeline (one instruction in flight at a time).
    #[arg(long)]
    no_pipeline: bool,

    /// Disable the forwarding network (stall on every data hazard).
    #[arg(long)]
    no_forwarding: bool,

    /// Dump the register file after the run.
    #[arg(long)]
    dump_registers: bool,
}

fn main() {
    let args = Args::parse();

    let config: Config = match fs::read_to_string(&args.config) {
        Ok(content) => toml::from_str(&content).expect("Failed to parse config"),
        Err(_) => Config::default(),
    };

    let mut sim = Simulator::new(&config);
    sim.set_environment(
        config.pipeline.enabled && !args.no_pipeline,
        config.pipeline.data_forwarding && !args.no_forwarding,
    );

    let image = match MachineImage::from_hex_file(&args.file) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
    };

    if !sim.load_program(&image) {
        for entry in sim.drain_logs() {
            eprintln!("[{}] {}", entry.code, entry.message);
        }
        process::exit(1);
    }

    sim.run();

    for entry in sim.drain_logs() {
        println!("[{}] {}", entry.code, entry.message);
    }

    let predictor = sim.predictor();
    sim.stats()
        .print(predictor.predictions, predictor.mispredictions);

    if args.dump_registers {
        println!("PC = {:#010x}", sim.pc());
        let regs = sim.registers();
        for i in (0..regs.len()).step_by(2) {
            println!(
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                regs[i],
                i + 1,
                regs[i + 1]
            );
        }
    }
}
