//! Instruction decoder.
//!
//! Classifies a 32-bit word into one of the six RV32 encoding formats,
//! extracts its fields, and sign-extends the immediate. Unknown
//! opcode/funct combinations are a fatal [`SimError::UnknownInstruction`];
//! recognized encodings outside the integer subset (`ld`, `sd`) are
//! [`SimError::Unsupported`].

use crate::common::SimError;
use crate::isa::{funct3, funct7, opcodes};

/// The six RV32 instruction encoding formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstrFormat {
    R,
    I,
    S,
    Sb,
    U,
    Uj,
}

/// Every instruction the simulator executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Sll,
    Srl,
    Sra,
    Slt,
    Addi,
    Andi,
    Ori,
    Xori,
    Slti,
    Sltiu,
    Slli,
    Srli,
    Srai,
    Lb,
    Lh,
    Lw,
    Jalr,
    Sb,
    Sh,
    Sw,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Lui,
    Auipc,
    Jal,
}

impl Mnemonic {
    /// True for LB/LH/LW.
    pub fn is_load(self) -> bool {
        matches!(self, Mnemonic::Lb | Mnemonic::Lh | Mnemonic::Lw)
    }

    /// True for SB/SH/SW.
    pub fn is_store(self) -> bool {
        matches!(self, Mnemonic::Sb | Mnemonic::Sh | Mnemonic::Sw)
    }

    /// True for conditional branches.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Mnemonic::Beq
                | Mnemonic::Bne
                | Mnemonic::Blt
                | Mnemonic::Bge
                | Mnemonic::Bltu
                | Mnemonic::Bgeu
        )
    }

    /// True for JAL and JALR.
    pub fn is_jump(self) -> bool {
        matches!(self, Mnemonic::Jal | Mnemonic::Jalr)
    }

    /// Assembler name of the instruction.
    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Mul => "mul",
            Mnemonic::Div => "div",
            Mnemonic::Rem => "rem",
            Mnemonic::And => "and",
            Mnemonic::Or => "or",
            Mnemonic::Xor => "xor",
            Mnemonic::Sll => "sll",
            Mnemonic::Srl => "srl",
            Mnemonic::Sra => "sra",
            Mnemonic::Slt => "slt",
            Mnemonic::Addi => "addi",
            Mnemonic::Andi => "andi",
            Mnemonic::Ori => "ori",
            Mnemonic::Xori => "xori",
            Mnemonic::Slti => "slti",
            Mnemonic::Sltiu => "sltiu",
            Mnemonic::Slli => "slli",
            Mnemonic::Srli => "srli",
            Mnemonic::Srai => "srai",
            Mnemonic::Lb => "lb",
            Mnemonic::Lh => "lh",
            Mnemonic::Lw => "lw",
            Mnemonic::Jalr => "jalr",
            Mnemonic::Sb => "sb",
            Mnemonic::Sh => "sh",
            Mnemonic::Sw => "sw",
            Mnemonic::Beq => "beq",
            Mnemonic::Bne => "bne",
            Mnemonic::Blt => "blt",
            Mnemonic::Bge => "bge",
            Mnemonic::Bltu => "bltu",
            Mnemonic::Bgeu => "bgeu",
            Mnemonic::Lui => "lui",
            Mnemonic::Auipc => "auipc",
            Mnemonic::Jal => "jal",
        }
    }
}

/// A fully decoded instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The raw instruction word.
    pub word: u32,
    /// Encoding format.
    pub format: InstrFormat,
    /// Resolved mnemonic.
    pub mnemonic: Mnemonic,
    /// Low seven opcode bits.
    pub opcode: u32,
    /// funct3 field.
    pub funct3: u32,
    /// funct7 field.
    pub funct7: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Sign-extended immediate. Zero for R-type.
    pub imm: i32,
}

fn imm_i(word: u32) -> i32 {
    (word as i32) >> 20
}

fn imm_s(word: u32) -> i32 {
    (((word & 0xfe00_0000) as i32) >> 20) | (((word >> 7) & 0x1f) as i32)
}

fn imm_sb(word: u32) -> i32 {
    let imm = ((word >> 31) & 0x1) << 12
        | ((word >> 7) & 0x1) << 11
        | ((word >> 25) & 0x3f) << 5
        | ((word >> 8) & 0xf) << 1;
    ((imm << 19) as i32) >> 19
}

fn imm_u(word: u32) -> i32 {
    (word & 0xffff_f000) as i32
}

fn imm_uj(word: u32) -> i32 {
    let imm = ((word >> 31) & 0x1) << 20
        | ((word >> 12) & 0xff) << 12
        | ((word >> 20) & 0x1) << 11
        | ((word >> 21) & 0x3ff) << 1;
    ((imm << 11) as i32) >> 11
}

/// Decodes a raw instruction word.
pub fn decode(word: u32) -> Result<Decoded, SimError> {
    let opcode = word & 0x7f;
    let rd = ((word >> 7) & 0x1f) as usize;
    let f3 = (word >> 12) & 0x7;
    let rs1 = ((word >> 15) & 0x1f) as usize;
    let rs2 = ((word >> 20) & 0x1f) as usize;
    let f7 = (word >> 25) & 0x7f;

    let unknown = || SimError::UnknownInstruction { word, opcode };

    let (format, mnemonic, imm) = match opcode {
        opcodes::OP_LUI => (InstrFormat::U, Mnemonic::Lui, imm_u(word)),
        opcodes::OP_AUIPC => (InstrFormat::U, Mnemonic::Auipc, imm_u(word)),
        opcodes::OP_JAL => (InstrFormat::Uj, Mnemonic::Jal, imm_uj(word)),
        opcodes::OP_JALR => match f3 {
            funct3::JALR => (InstrFormat::I, Mnemonic::Jalr, imm_i(word)),
            _ => return Err(unknown()),
        },
        opcodes::OP_BRANCH => {
            let m = match f3 {
                funct3::BEQ => Mnemonic::Beq,
                funct3::BNE => Mnemonic::Bne,
                funct3::BLT => Mnemonic::Blt,
                funct3::BGE => Mnemonic::Bge,
                funct3::BLTU => Mnemonic::Bltu,
                funct3::BGEU => Mnemonic::Bgeu,
                _ => return Err(unknown()),
            };
            (InstrFormat::Sb, m, imm_sb(word))
        }
        opcodes::OP_LOAD => {
            let m = match f3 {
                funct3::LB => Mnemonic::Lb,
                funct3::LH => Mnemonic::Lh,
                funct3::LW => Mnemonic::Lw,
                funct3::LD => return Err(SimError::Unsupported("ld")),
                _ => return Err(unknown()),
            };
            (InstrFormat::I, m, imm_i(word))
        }
        opcodes::OP_STORE => {
            let m = match f3 {
                funct3::SB => Mnemonic::Sb,
                funct3::SH => Mnemonic::Sh,
                funct3::SW => Mnemonic::Sw,
                funct3::SD => return Err(SimError::Unsupported("sd")),
                _ => return Err(unknown()),
            };
            (InstrFormat::S, m, imm_s(word))
        }
        opcodes::OP_IMM => {
            let m = match f3 {
                funct3::ADD_SUB => Mnemonic::Addi,
                funct3::SLT => Mnemonic::Slti,
                funct3::SLTU => Mnemonic::Sltiu,
                funct3::XOR => Mnemonic::Xori,
                funct3::OR => Mnemonic::Ori,
                funct3::AND => Mnemonic::Andi,
                funct3::SLL => match f7 {
                    funct7::DEFAULT => Mnemonic::Slli,
                    _ => return Err(unknown()),
                },
                funct3::SRL_SRA => match f7 {
                    funct7::DEFAULT => Mnemonic::Srli,
                    funct7::SUB_SRA => Mnemonic::Srai,
                    _ => return Err(unknown()),
                },
                _ => return Err(unknown()),
            };
            (InstrFormat::I, m, imm_i(word))
        }
        opcodes::OP_REG => {
            let m = match (f3, f7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => Mnemonic::Add,
                (funct3::ADD_SUB, funct7::SUB_SRA) => Mnemonic::Sub,
                (funct3::SLL, funct7::DEFAULT) => Mnemonic::Sll,
                (funct3::SLT, funct7::DEFAULT) => Mnemonic::Slt,
                (funct3::XOR, funct7::DEFAULT) => Mnemonic::Xor,
                (funct3::SRL_SRA, funct7::DEFAULT) => Mnemonic::Srl,
                (funct3::SRL_SRA, funct7::SUB_SRA) => Mnemonic::Sra,
                (funct3::OR, funct7::DEFAULT) => Mnemonic::Or,
                (funct3::AND, funct7::DEFAULT) => Mnemonic::And,
                (funct3::ADD_SUB, funct7::M_EXTENSION) => Mnemonic::Mul,
                (funct3::XOR, funct7::M_EXTENSION) => Mnemonic::Div,
                (funct3::OR, funct7::M_EXTENSION) => Mnemonic::Rem,
                _ => return Err(unknown()),
            };
            (InstrFormat::R, m, 0)
        }
        _ => return Err(unknown()),
    };

    Ok(Decoded {
        word,
        format,
        mnemonic,
        opcode,
        funct3: f3,
        funct7: f7,
        rd,
        rs1,
        rs2,
        imm,
    })
}
