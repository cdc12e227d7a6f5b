//! Control signals and control-signal generation.
//!
//! This module maps a decoded instruction onto the signals that steer the
//! datapath during DECODE. It performs:
//! 1. **Operation Classification:** Selects the ALU operation and branch condition.
//! 2. **Operand Selection:** Defines sources for ALU inputs (registers, PC, or immediates).
//! 3. **Memory Control:** Specifies access width and sign extension for loads and stores.
//! 4. **Condition Reporting:** Rejects undefined encodings and inert instructions with a
//!    [`Condition`] instead of signals.

use crate::common::data::MemWidth;
use crate::common::error::Condition;
use crate::isa::instruction::{Decoded, InstructionBits, Opcode};
use crate::isa::rv32i::{funct3, funct7};

/// Bit of the unsigned I-type immediate (`instr[30]`) selecting SRAI over SRLI.
const IMM_ARITH_SHIFT_BIT: u32 = 1 << 10;

/// ALU operation types for RV32I integer instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also address generation).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,
}

/// Conditional branch comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchCond {
    /// Branch if equal.
    #[default]
    Eq,
    /// Branch if not equal.
    Ne,
    /// Branch if less than (signed).
    Lt,
    /// Branch if greater than or equal (signed).
    Ge,
    /// Branch if less than (unsigned).
    Ltu,
    /// Branch if greater than or equal (unsigned).
    Geu,
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use `rs1` register value.
    #[default]
    Reg1,

    /// Use the address of the instruction in DECODE.
    Pc,

    /// Use zero.
    Zero,

    /// Use the base register value (loads and stores).
    Base,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use sign-extended immediate value.
    #[default]
    Imm,

    /// Use the zero-extended `instr[30:20]` field (immediate shift amounts).
    ImmUnsigned,

    /// Use `rs2` register value.
    Reg2,
}

/// Control signals for one instruction in DECODE.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Issue a bus read (load).
    pub mem_read: bool,
    /// Issue a bus write (store).
    pub mem_write: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Instruction is an unconditional jump (`JAL`/`JALR`).
    pub jump: bool,
    /// Jump target comes from `rs1 + imm` with bit 0 cleared (`JALR`).
    pub jump_reg: bool,
    /// Comparison used when `branch` is set.
    pub cond: BranchCond,
    /// Width of memory access.
    pub width: MemWidth,
    /// Load should be sign-extended.
    pub signed_load: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
}

/// Generates the control signals for a decoded instruction.
///
/// # Arguments
///
/// * `d` - The decoded instruction currently in DECODE.
///
/// # Returns
///
/// The signals for the datapath, or the [`Condition`] that makes the
/// instruction a no-op: an unrecognized opcode, an undefined funct3/funct7
/// pairing, or an inert FENCE/SYSTEM instruction.
pub fn decode_control(d: &Decoded) -> Result<ControlSignals, Condition> {
    let Some(class) = d.class else {
        return Err(Condition::UnrecognizedOpcode {
            raw: d.raw,
            opcode: d.opcode,
        });
    };

    let unsupported = |funct7: u32| Condition::UnsupportedFunction {
        raw: d.raw,
        class,
        funct3: d.funct3,
        funct7,
    };

    let mut c = ControlSignals {
        a_src: OpASrc::Reg1,
        b_src: OpBSrc::Imm,
        alu: AluOp::Add,
        ..Default::default()
    };

    match class {
        Opcode::Lui => {
            c.reg_write = true;
            c.a_src = OpASrc::Zero;
        }
        Opcode::Auipc => {
            c.reg_write = true;
            c.a_src = OpASrc::Pc;
        }
        Opcode::Jal => {
            c.reg_write = true;
            c.jump = true;
        }
        Opcode::Jalr => {
            if d.funct3 != funct3::JALR {
                return Err(unsupported(0));
            }
            c.reg_write = true;
            c.jump = true;
            c.jump_reg = true;
        }
        Opcode::Branch => {
            c.branch = true;
            c.b_src = OpBSrc::Reg2;
            c.cond = match d.funct3 {
                funct3::BEQ => BranchCond::Eq,
                funct3::BNE => BranchCond::Ne,
                funct3::BLT => BranchCond::Lt,
                funct3::BGE => BranchCond::Ge,
                funct3::BLTU => BranchCond::Ltu,
                funct3::BGEU => BranchCond::Geu,
                _ => return Err(unsupported(0)),
            };
        }
        Opcode::Load => {
            c.reg_write = true;
            c.mem_read = true;
            c.a_src = OpASrc::Base;
            let (w, s) = match d.funct3 {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, true),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                _ => return Err(unsupported(0)),
            };
            c.width = w;
            c.signed_load = s;
        }
        Opcode::Store => {
            c.mem_write = true;
            c.a_src = OpASrc::Base;
            c.width = match d.funct3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return Err(unsupported(0)),
            };
        }
        Opcode::OpImm => {
            c.reg_write = true;
            let upper = d.raw.funct7();
            c.alu = match d.funct3 {
                funct3::ADD_SUB => AluOp::Add,
                funct3::SLT => AluOp::Slt,
                funct3::SLTU => AluOp::Sltu,
                funct3::XOR => AluOp::Xor,
                funct3::OR => AluOp::Or,
                funct3::AND => AluOp::And,
                funct3::SLL if upper == funct7::DEFAULT => AluOp::Sll,
                funct3::SRL_SRA if upper == funct7::DEFAULT || upper == funct7::SRA => {
                    if d.imm_unsigned & IMM_ARITH_SHIFT_BIT != 0 {
                        AluOp::Sra
                    } else {
                        AluOp::Srl
                    }
                }
                _ => return Err(unsupported(upper)),
            };
            if matches!(c.alu, AluOp::Sll | AluOp::Srl | AluOp::Sra) {
                c.b_src = OpBSrc::ImmUnsigned;
            }
        }
        Opcode::Op => {
            c.reg_write = true;
            c.b_src = OpBSrc::Reg2;
            c.alu = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
                (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
                (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
                (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                (funct3::OR, funct7::DEFAULT) => AluOp::Or,
                (funct3::AND, funct7::DEFAULT) => AluOp::And,
                _ => return Err(unsupported(d.funct7)),
            };
        }
        Opcode::MiscMem => return Err(Condition::InertFence),
        Opcode::System => return Err(Condition::InertSystem { raw: d.raw }),
    }

    Ok(c)
}
