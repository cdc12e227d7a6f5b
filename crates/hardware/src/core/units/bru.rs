//! Branch Resolution Unit (BRU).
//!
//! Evaluates conditional branch comparisons and computes control-transfer
//! targets. The core has no prediction: every branch is resolved during
//! DECODE and the PC is written once, at the end of the instruction.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::signals::BranchCond;

/// Mask clearing bit 0 of a JALR target.
const JALR_TARGET_MASK: u32 = !1;

/// Branch Resolution Unit.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Evaluates a branch condition on two register operands.
    ///
    /// # Arguments
    ///
    /// * `cond` - The comparison selected by funct3.
    /// * `a`    - Value of `rs1`.
    /// * `b`    - Value of `rs2`.
    ///
    /// # Returns
    ///
    /// `true` if the branch is taken.
    pub const fn taken(cond: BranchCond, a: u32, b: u32) -> bool {
        match cond {
            BranchCond::Eq => a == b,
            BranchCond::Ne => a != b,
            BranchCond::Lt => (a as i32) < (b as i32),
            BranchCond::Ge => (a as i32) >= (b as i32),
            BranchCond::Ltu => a < b,
            BranchCond::Geu => a >= b,
        }
    }

    /// Computes a PC-relative target (`JAL` and taken branches).
    pub const fn relative_target(pc: u32, imm: i32) -> u32 {
        pc.wrapping_add(imm as u32)
    }

    /// Computes a register-indirect target (`JALR`): `(rs1 + imm) & !1`.
    pub const fn register_target(rs1: u32, imm: i32) -> u32 {
        rs1.wrapping_add(imm as u32) & JALR_TARGET_MASK
    }

    /// Returns the address of the instruction following `pc`.
    pub const fn fallthrough(pc: u32) -> u32 {
        pc.wrapping_add(INSTRUCTION_SIZE)
    }

    /// Returns `true` if `target` is not word-aligned.
    pub const fn is_misaligned(target: u32) -> bool {
        target % INSTRUCTION_SIZE != 0
    }
}
