//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions, the closed set of RV32I opcode classes,
//! and the `Decoded` structure produced by the decoder.

use std::fmt;

use crate::isa::rv32i::opcodes;

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting the destination register field (bits 7-11).
pub const RD_MASK: u32 = 0x1F;
/// Bit mask for extracting the first source register field (bits 15-19).
pub const RS1_MASK: u32 = 0x1F;
/// Bit mask for extracting the second source register field (bits 20-24).
pub const RS2_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Trait for extracting instruction fields from encoded instructions.
///
/// Provides methods to extract the standard RISC-V instruction fields
/// from a 32-bit instruction encoding. Extraction is format-agnostic; the
/// decoder decides which fields are meaningful for a given opcode.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    ///
    /// Bit 5 distinguishes the alternate R-type encodings (SUB, SRA).
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & RD_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & RS1_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & RS2_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }
}

/// RISC-V instruction encoding formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Register-register (`funct7 | rs2 | rs1 | funct3 | rd | opcode`).
    R,
    /// Register-immediate (`imm[11:0] | rs1 | funct3 | rd | opcode`).
    I,
    /// Store (`imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`).
    S,
    /// Conditional branch, even offsets only.
    B,
    /// Upper immediate (`imm[31:12] | rd | opcode`).
    U,
    /// Unconditional jump, even offsets only.
    J,
}

/// Opcode classes recognized by the RV32I core.
///
/// Every other 7-bit opcode value is unrecognized and maps to `None` in
/// [`Opcode::from_bits`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// LB, LH, LW, LBU, LHU.
    Load,
    /// FENCE (recognized, inert).
    MiscMem,
    /// ADDI, SLTI, SLTIU, XORI, ORI, ANDI, SLLI, SRLI, SRAI.
    OpImm,
    /// Add upper immediate to PC.
    Auipc,
    /// SB, SH, SW.
    Store,
    /// Register-register ALU operations.
    Op,
    /// Load upper immediate.
    Lui,
    /// BEQ, BNE, BLT, BGE, BLTU, BGEU.
    Branch,
    /// Jump and link register.
    Jalr,
    /// Jump and link.
    Jal,
    /// ECALL, EBREAK, CSR access (recognized, inert).
    System,
}

impl Opcode {
    /// Maps a 7-bit opcode field to its class.
    ///
    /// # Returns
    ///
    /// `None` for encodings outside the RV32I base set.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits & OPCODE_MASK {
            opcodes::OP_LOAD => Some(Self::Load),
            opcodes::OP_MISC_MEM => Some(Self::MiscMem),
            opcodes::OP_IMM => Some(Self::OpImm),
            opcodes::OP_AUIPC => Some(Self::Auipc),
            opcodes::OP_STORE => Some(Self::Store),
            opcodes::OP_REG => Some(Self::Op),
            opcodes::OP_LUI => Some(Self::Lui),
            opcodes::OP_BRANCH => Some(Self::Branch),
            opcodes::OP_JALR => Some(Self::Jalr),
            opcodes::OP_JAL => Some(Self::Jal),
            opcodes::OP_SYSTEM => Some(Self::System),
            _ => None,
        }
    }

    /// Returns the 7-bit encoding of this opcode class.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Load => opcodes::OP_LOAD,
            Self::MiscMem => opcodes::OP_MISC_MEM,
            Self::OpImm => opcodes::OP_IMM,
            Self::Auipc => opcodes::OP_AUIPC,
            Self::Store => opcodes::OP_STORE,
            Self::Op => opcodes::OP_REG,
            Self::Lui => opcodes::OP_LUI,
            Self::Branch => opcodes::OP_BRANCH,
            Self::Jalr => opcodes::OP_JALR,
            Self::Jal => opcodes::OP_JAL,
            Self::System => opcodes::OP_SYSTEM,
        }
    }

    /// Returns the encoding format used by this opcode class.
    pub const fn format(self) -> Format {
        match self {
            Self::Load | Self::MiscMem | Self::OpImm | Self::Jalr | Self::System => Format::I,
            Self::Auipc | Self::Lui => Format::U,
            Self::Store => Format::S,
            Self::Op => Format::R,
            Self::Branch => Format::B,
            Self::Jal => Format::J,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "LOAD",
            Self::MiscMem => "MISC_MEM",
            Self::OpImm => "OP_IMM",
            Self::Auipc => "AUIPC",
            Self::Store => "STORE",
            Self::Op => "OP",
            Self::Lui => "LUI",
            Self::Branch => "BRANCH",
            Self::Jalr => "JALR",
            Self::Jal => "JAL",
            Self::System => "SYSTEM",
        };
        f.write_str(name)
    }
}

/// Decoded instruction structure containing all extracted fields.
///
/// Only the fields that belong to the instruction's format are populated;
/// the rest stay zero. An unrecognized opcode yields `class == None` and
/// zeroed fields, with `raw` and `opcode` kept for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Extracted 7-bit opcode field.
    pub opcode: u32,
    /// Opcode class, if the opcode is part of RV32I.
    pub class: Option<Opcode>,
    /// Function code field 3.
    pub funct3: u32,
    /// Function code field 7 (R-type only).
    pub funct7: u32,
    /// Sign-extended immediate value.
    pub imm: i32,
    /// Zero-extended `instr[30:20]` (I-type only); selects shift amount and
    /// the arithmetic-shift bit.
    pub imm_unsigned: u32,
    /// First source register index (S-type: the register holding the store data).
    pub rs1: usize,
    /// Second source register index (R/B-type only).
    pub rs2: usize,
    /// Destination register index.
    pub rd: usize,
    /// Base address register index (loads and stores).
    pub base: usize,
}

impl Decoded {
    /// Returns `true` if the opcode was recognized.
    pub const fn is_recognized(&self) -> bool {
        self.class.is_some()
    }
}
