//! Shared helpers for integration tests: a raw instruction encoder and
//! simulator constructors.

#![allow(dead_code)]

use rv32sim::config::Config;
use rv32sim::core::Simulator;
use rv32sim::sim::MachineImage;

/// Base address of the data segment, re-exported for test programs.
pub const DATA_BASE: u32 = 0x1000_0000;

fn r_type(opcode: u32, rd: u32, f3: u32, rs1: u32, rs2: u32, f7: u32) -> u32 {
    (f7 << 25) | (rs2 << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcode
}

fn i_type(opcode: u32, rd: u32, f3: u32, rs1: u32, imm: i32) -> u32 {
    ((imm as u32 & 0xfff) << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcode
}

fn s_type(opcode: u32, f3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    ((imm >> 5) & 0x7f) << 25
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | (imm & 0x1f) << 7
        | opcode
}

fn sb_type(opcode: u32, f3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    ((imm >> 12) & 0x1) << 31
        | ((imm >> 5) & 0x3f) << 25
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | ((imm >> 1) & 0xf) << 8
        | ((imm >> 11) & 0x1) << 7
        | opcode
}

fn u_type(opcode: u32, rd: u32, imm20: u32) -> u32 {
    (imm20 << 12) | (rd << 7) | opcode
}

fn uj_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    ((imm >> 20) & 0x1) << 31
        | ((imm >> 1) & 0x3ff) << 21
        | ((imm >> 11) & 0x1) << 20
        | ((imm >> 12) & 0xff) << 12
        | (rd << 7)
        | opcode
}

pub fn add(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x0, rs1, rs2, 0x00)
}

pub fn sub(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x0, rs1, rs2, 0x20)
}

pub fn mul(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x0, rs1, rs2, 0x01)
}

pub fn div(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x4, rs1, rs2, 0x01)
}

pub fn rem(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x6, rs1, rs2, 0x01)
}

pub fn and(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x7, rs1, rs2, 0x00)
}

pub fn or(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x6, rs1, rs2, 0x00)
}

pub fn xor(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x4, rs1, rs2, 0x00)
}

pub fn sll(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x1, rs1, rs2, 0x00)
}

pub fn srl(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x5, rs1, rs2, 0x00)
}

pub fn sra(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x5, rs1, rs2, 0x20)
}

pub fn slt(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(0x33, rd, 0x2, rs1, rs2, 0x00)
}

pub fn addi(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x13, rd, 0x0, rs1, imm)
}

pub fn andi(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x13, rd, 0x7, rs1, imm)
}

pub fn ori(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x13, rd, 0x6, rs1, imm)
}

pub fn xori(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x13, rd, 0x4, rs1, imm)
}

pub fn slti(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x13, rd, 0x2, rs1, imm)
}

pub fn sltiu(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x13, rd, 0x3, rs1, imm)
}

pub fn slli(rd: u32, rs1: u32, shamt: u32) -> u32 {
    i_type(0x13, rd, 0x1, rs1, shamt as i32)
}

pub fn srli(rd: u32, rs1: u32, shamt: u32) -> u32 {
    i_type(0x13, rd, 0x5, rs1, shamt as i32)
}

pub fn srai(rd: u32, rs1: u32, shamt: u32) -> u32 {
    i_type(0x13, rd, 0x5, rs1, (0x400 | shamt) as i32)
}

pub fn lb(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x03, rd, 0x0, rs1, imm)
}

pub fn lh(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x03, rd, 0x1, rs1, imm)
}

pub fn lw(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x03, rd, 0x2, rs1, imm)
}

pub fn jalr(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(0x67, rd, 0x0, rs1, imm)
}

pub fn sb(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(0x23, 0x0, rs1, rs2, imm)
}

pub fn sh(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(0x23, 0x1, rs1, rs2, imm)
}

pub fn sw(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(0x23, 0x2, rs1, rs2, imm)
}

pub fn beq(rs1: u32, rs2: u32, imm: i32) -> u32 {
    sb_type(0x63, 0x0, rs1, rs2, imm)
}

pub fn bne(rs1: u32, rs2: u32, imm: i32) -> u32 {
    sb_type(0x63, 0x1, rs1, rs2, imm)
}

pub fn blt(rs1: u32, rs2: u32, imm: i32) -> u32 {
    sb_type(0x63, 0x4, rs1, rs2, imm)
}

pub fn bge(rs1: u32, rs2: u32, imm: i32) -> u32 {
    sb_type(0x63, 0x5, rs1, rs2, imm)
}

pub fn lui(rd: u32, imm20: u32) -> u32 {
    u_type(0x37, rd, imm20)
}

pub fn auipc(rd: u32, imm20: u32) -> u32 {
    u_type(0x17, rd, imm20)
}

pub fn jal(rd: u32, imm: i32) -> u32 {
    uj_type(0x6f, rd, imm)
}

/// A simulator with the default configuration (pipelined, forwarding on,
/// two-bit predictor).
pub fn simulator() -> Simulator {
    Simulator::new(&Config::default())
}

/// Loads a contiguous text segment starting at address zero and runs it
/// to completion under the given modes.
pub fn run_program(words: &[u32], pipeline: bool, forwarding: bool) -> Simulator {
    let mut sim = simulator();
    sim.set_environment(pipeline, forwarding);
    assert!(sim.load_program(&MachineImage::from_words(words)));
    sim.run();
    sim
}

/// Like [`run_program`], with data words preloaded into the data segment.
pub fn run_program_with_data(
    words: &[u32],
    data: &[(u32, u32)],
    pipeline: bool,
    forwarding: bool,
) -> Simulator {
    let mut sim = simulator();
    sim.set_environment(pipeline, forwarding);
    let mut image = MachineImage::from_words(words);
    for &(addr, word) in data {
        image.push_data_word(addr, word);
    }
    assert!(sim.load_program(&image));
    sim.run();
    sim
}
