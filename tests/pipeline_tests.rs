//! End-to-end pipeline tests: hazards, forwarding, branch prediction,
//! mode equivalence, and termination behavior.

mod common;

use common::*;
use rv32sim::config::{Config, GeneralConfig};
use rv32sim::core::pipeline::latches::Stage;
use rv32sim::core::Simulator;
use rv32sim::sim::MachineImage;

/// addi chain with back-to-back dependencies, forwarding on: one result
/// per cycle once the pipeline fills.
#[test]
fn test_addi_chain_forwarding_on() {
    let sim = run_program(
        &[addi(5, 0, 10), addi(6, 5, 5), addi(7, 6, -3)],
        true,
        true,
    );

    let regs = sim.registers();
    assert_eq!(regs[5], 10);
    assert_eq!(regs[6], 15);
    assert_eq!(regs[7], 12);
    assert_eq!(sim.cycles(), 7, "3 instructions fill a 5-stage pipeline in 7 cycles");
    assert_eq!(sim.stalls(), 0, "forwarding removes every stall");
}

/// The same chain with forwarding off: each dependent pair waits two
/// cycles in decode for its producer to retire.
#[test]
fn test_addi_chain_forwarding_off() {
    let sim = run_program(
        &[addi(5, 0, 10), addi(6, 5, 5), addi(7, 6, -3)],
        true,
        false,
    );

    let regs = sim.registers();
    assert_eq!(regs[5], 10);
    assert_eq!(regs[6], 15);
    assert_eq!(regs[7], 12, "architectural state must match the forwarding run");
    assert_eq!(sim.cycles(), 11);
    assert_eq!(sim.stalls(), 4, "two stall cycles per dependent pair");
    assert_eq!(sim.stats().data_hazards, 4);
    assert_eq!(sim.stats().data_hazard_stalls, 4);
}

/// A load followed immediately by a consumer takes exactly one load-use
/// stall; the loaded value reaches the consumer via MEM→EX forwarding.
#[test]
fn test_load_use_hazard() {
    let sim = run_program_with_data(
        &[lw(5, 3, 0), addi(6, 5, 1)],
        &[(DATA_BASE, 0x1234_5678)],
        true,
        true,
    );

    let regs = sim.registers();
    assert_eq!(regs[5], 0x1234_5678);
    assert_eq!(regs[6], 0x1234_5679);
    assert_eq!(sim.stalls(), 1, "exactly one load-use stall");
    assert_eq!(sim.stats().data_hazards, 1);
    assert_eq!(sim.cycles(), 7);
}

/// A taken branch against a cold (not-taken) predictor flushes the wrong
/// path once and never executes it.
#[test]
fn test_taken_branch_mispredict_flush() {
    let sim = run_program(
        &[
            addi(5, 0, 1),
            beq(5, 5, 8),
            addi(6, 0, 99),
            addi(7, 0, 7),
        ],
        true,
        true,
    );

    let regs = sim.registers();
    assert_eq!(regs[5], 1);
    assert_eq!(regs[6], 0, "wrong-path instruction must be squashed");
    assert_eq!(regs[7], 7);
    assert_eq!(sim.stats().control_hazards, 1);
    assert_eq!(sim.stats().control_hazard_stalls, 2);
    assert_eq!(sim.stats().pipeline_flushes, 1);
    assert_eq!(sim.stats().instructions_executed, 3, "squashed fetch never decoded");
    assert_eq!(sim.cycles(), 9);
}

/// JAL links the return address and JALR returns through it.
#[test]
fn test_jal_jalr_linkage() {
    let mut image = MachineImage::new();
    image.push_text(0, jal(1, 12));
    image.push_text(4, addi(5, 0, 42));
    image.push_text(12, jalr(0, 1, 0));

    let mut sim = simulator();
    assert!(sim.load_program(&image));
    sim.run();

    let regs = sim.registers();
    assert_eq!(regs[1], 4, "x1 holds the JAL's PC+4");
    assert_eq!(regs[5], 42, "the instruction after JAL runs after the return");
    assert_eq!(sim.pc(), 8, "PC drains past the instruction after JAL");
    assert!(!sim.is_running());
}

/// Division and remainder by zero follow the RISC-V M convention.
#[test]
fn test_div_rem_by_zero() {
    let sim = run_program(
        &[
            addi(5, 0, 7),
            addi(6, 0, 0),
            div(7, 5, 6),
            rem(8, 5, 6),
        ],
        true,
        true,
    );

    let regs = sim.registers();
    assert_eq!(regs[7], 0xffff_ffff);
    assert_eq!(regs[8], 7);
}

/// SH then LB round-trips halves through the little-endian data image
/// with sign extension on the byte loads.
#[test]
fn test_store_half_load_byte_sign_extension() {
    let sim = run_program_with_data(
        &[
            lw(5, 3, 8),
            sh(5, 3, 0),
            lb(6, 3, 0),
            lb(7, 3, 1),
        ],
        &[(DATA_BASE + 8, 0x0000_abcd)],
        true,
        true,
    );

    let regs = sim.registers();
    assert_eq!(regs[6], 0xffff_ffcd);
    assert_eq!(regs[7], 0xffff_ffab);
    assert_eq!(sim.data_image().get(&DATA_BASE).copied(), Some(0xcd));
    assert_eq!(sim.data_image().get(&(DATA_BASE + 1)).copied(), Some(0xab));
}

fn mixed_program() -> Vec<u32> {
    vec![
        addi(5, 0, 10),
        addi(6, 0, 3),
        mul(7, 5, 6),
        sub(8, 7, 5),
        sw(8, 3, 0),
        lw(9, 3, 0),
        addi(9, 9, 1),
        blt(6, 5, 8),
        addi(10, 0, 99),
        xor(11, 9, 6),
        sra(12, 8, 6),
    ]
}

/// Every mode combination produces the same architectural state; only
/// the cycle counts differ.
#[test]
fn test_mode_equivalence() {
    let reference = run_program(&mixed_program(), true, true);
    let ref_regs = reference.registers();

    assert_eq!(ref_regs[7], 30);
    assert_eq!(ref_regs[8], 20);
    assert_eq!(ref_regs[9], 21);
    assert_eq!(ref_regs[10], 1, "skipped by the taken branch; keeps its boot value");
    assert_eq!(ref_regs[11], 22);
    assert_eq!(ref_regs[12], 2);

    for (pipeline, forwarding) in [(true, false), (false, true), (false, false)] {
        let sim = run_program(&mixed_program(), pipeline, forwarding);
        assert_eq!(
            sim.registers(),
            ref_regs,
            "registers diverged with pipeline={} forwarding={}",
            pipeline,
            forwarding
        );
        assert_eq!(
            sim.data_image().get(&DATA_BASE).copied(),
            reference.data_image().get(&DATA_BASE).copied(),
            "memory diverged with pipeline={} forwarding={}",
            pipeline,
            forwarding
        );
    }
}

/// Forwarding strictly reduces the cycle count of a hazard-heavy program.
#[test]
fn test_forwarding_saves_cycles() {
    let with = run_program(&mixed_program(), true, true);
    let without = run_program(&mixed_program(), true, false);
    assert!(
        with.cycles() < without.cycles(),
        "forwarding-on ({}) should beat forwarding-off ({})",
        with.cycles(),
        without.cycles()
    );
}

/// In a hazard-free pipelined program CPI approaches 1.
#[test]
fn test_cpi_approaches_one() {
    let n = 24;
    let words: Vec<u32> = (0..n).map(|i| addi(5 + (i % 20) as u32, 0, i)).collect();
    let sim = run_program(&words, true, true);

    assert_eq!(sim.stalls(), 0);
    assert_eq!(sim.cycles(), n as u64 + 4, "fill latency plus one retire per cycle");
    let cpi = sim.stats().cpi();
    assert!(cpi < 1.2, "CPI {} should approach 1", cpi);
    assert!(sim.cycles() >= sim.stats().instructions_executed);
}

/// Non-pipelined execution retires one instruction every five cycles and
/// matches the pipelined architectural state.
#[test]
fn test_non_pipelined_cycle_count() {
    let words = [addi(5, 0, 1), addi(6, 0, 2), addi(7, 0, 3)];
    let sim = run_program(&words, false, false);

    assert_eq!(sim.cycles(), 15);
    assert_eq!(sim.stalls(), 0, "a single record in flight never stalls");
    let regs = sim.registers();
    assert_eq!((regs[5], regs[6], regs[7]), (1, 2, 3));
}

/// x0 is immutable no matter how it is written.
#[test]
fn test_x0_is_hardwired_zero() {
    let sim = run_program(
        &[addi(0, 0, 5), addi(5, 0, 9), add(0, 5, 5)],
        true,
        true,
    );
    assert_eq!(sim.registers()[0], 0);
}

/// A loop driven by the predictor terminates with sane predictor state.
#[test]
fn test_branch_predictor_learns_loop() {
    let sim = run_program(
        &[addi(5, 0, 3), addi(5, 5, -1), bne(5, 0, -4)],
        true,
        true,
    );

    assert_eq!(sim.registers()[5], 0);
    let bp = sim.predictor();
    assert!(bp.predictions >= 3, "every bne fetch consults the predictor");
    assert!(bp.mispredictions >= 1, "the cold predictor misses the first iteration");
    let acc = bp.accuracy();
    assert!((0.0..=100.0).contains(&acc));
    assert!(sim.stats().pipeline_flushes >= 1);
}

/// Step responses surface stalls, forwarding, and termination to the host.
#[test]
fn test_step_responses() {
    let mut sim = simulator();
    let mut image = MachineImage::from_words(&[lw(5, 3, 0), addi(6, 5, 1)]);
    image.push_data_word(DATA_BASE, 0x1234_5678);
    assert!(sim.load_program(&image));

    let mut saw_stall = false;
    let mut saw_forward = false;
    loop {
        let more = sim.step();
        let r = sim.ui_response();
        saw_stall |= r.is_stalled;
        saw_forward |= r.is_data_forwarded;
        if !more {
            assert!(r.is_program_terminated);
            break;
        }
    }
    assert!(saw_stall, "the load-use stall must be reported");
    assert!(saw_forward, "the MEM→EX forward must be reported");
}

/// The first step after natural termination fails without advancing.
#[test]
fn test_step_past_end() {
    let mut sim = simulator();
    assert!(sim.load_program(&MachineImage::from_words(&[addi(5, 0, 1)])));
    sim.run();

    let cycles = sim.cycles();
    assert!(!sim.step());
    assert_eq!(sim.cycles(), cycles, "stepping past the end must not advance");
    let logs = sim.drain_logs();
    assert!(logs.iter().any(|e| e.code == 404 && e.message.contains("Cannot step")));
}

/// Exceeding the step cap halts the run with a warning.
#[test]
fn test_runaway_execution_capped() {
    let config = Config {
        general: GeneralConfig {
            trace_instructions: false,
            max_steps: 50,
        },
        ..Config::default()
    };
    let mut sim = Simulator::new(&config);
    // beq x0, x0, 0 branches to itself forever.
    assert!(sim.load_program(&MachineImage::from_words(&[beq(0, 0, 0)])));
    sim.run();

    let logs = sim.drain_logs();
    assert!(
        logs.iter()
            .any(|e| e.code == 400 && e.message.contains("maximum step count")),
        "runaway execution must log a warning"
    );
}

/// An out-of-range store is fatal: the run halts with an error log.
#[test]
fn test_memory_range_violation_halts() {
    let mut sim = simulator();
    assert!(sim.load_program(&MachineImage::from_words(&[
        lui(5, 0x80000),
        sw(0, 5, 0),
    ])));
    sim.run();

    assert!(!sim.is_running());
    assert!(sim.ui_response().is_program_terminated);
    let logs = sim.drain_logs();
    assert!(logs.iter().any(|e| e.code == 404 && e.message.contains("Runtime error")));
    assert!(logs.iter().any(|e| e.code == 300), "memory errors leave a trace entry");
}

/// Undecodable words are rejected at load time.
#[test]
fn test_load_rejects_undecodable_word() {
    let mut sim = simulator();
    assert!(!sim.load_program(&MachineImage::from_words(&[0xffff_ffff])));
    let logs = sim.drain_logs();
    assert!(logs.iter().any(|e| e.code == 404));
}

/// An empty image is rejected with a trace entry.
#[test]
fn test_load_rejects_empty_image() {
    let mut sim = simulator();
    assert!(!sim.load_program(&MachineImage::new()));
    let logs = sim.drain_logs();
    assert!(logs.iter().any(|e| e.code == 300 && e.message.contains("Empty Code")));
}

/// Loading succeeds with an info entry and arms the fetch stage.
#[test]
fn test_load_arms_fetch() {
    let mut sim = simulator();
    assert!(sim.load_program(&MachineImage::from_words(&[addi(5, 0, 1)])));
    assert!(sim.is_running());

    let stages = sim.active_stages();
    let fetch = stages.iter().find(|s| s.stage == Stage::Fetch).unwrap();
    assert!(fetch.active);
    assert_eq!(fetch.pc, 0);

    let logs = sim.drain_logs();
    assert!(logs.iter().any(|e| e.code == 200 && e.message.contains("loaded successfully")));
}

/// The text image carries disassembly for every loaded word.
#[test]
fn test_text_image_disassembly() {
    let mut sim = simulator();
    assert!(sim.load_program(&MachineImage::from_words(&[addi(5, 0, 3), beq(5, 0, 8)])));
    assert_eq!(sim.text_image().get(0).unwrap().disasm, "addi x5, x0, 3");
    assert_eq!(sim.text_image().get(4).unwrap().disasm, "beq x5, x0, 8");
}

/// Hex listings round-trip through the loader.
#[test]
fn test_hex_listing_loads() {
    let listing = "\
# text
0: 0x00a00293
4: 0x00528313
# data
0x10000000: 0xdeadbeef
";
    let image = MachineImage::from_hex(listing).unwrap();
    let mut sim = simulator();
    assert!(sim.load_program(&image));
    sim.run();

    let regs = sim.registers();
    assert_eq!(regs[5], 10);
    assert_eq!(regs[6], 15);
    assert_eq!(sim.data_image().get(&DATA_BASE).copied(), Some(0xef));
}
