//! DECODE-state datapath.
//!
//! This module evaluates one decoded instruction against the register file and
//! the PC of the instruction. It performs:
//! 1. **Control Generation:** Maps the decoded fields onto [`ControlSignals`].
//! 2. **Operand Selection:** Routes registers, PC and immediates into the ALU.
//! 3. **Control Transfer:** Resolves jumps and branches to the next PC.
//! 4. **Memory Issue:** Builds the bus request and load staging for loads and stores.
//!
//! The result is a description of the side effects; nothing is committed here.

use crate::common::data::MemWidth;
use crate::common::error::Condition;
use crate::common::reg::{RegisterFile, WritePort};
use crate::core::signals::{AluOp, ControlSignals, OpASrc, OpBSrc, decode_control};
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;
use crate::core::units::lsu::Lsu;
use crate::isa::instruction::Decoded;
use crate::soc::bus::BusMaster;

/// Load staging registers, latched when a load is issued.
///
/// They carry what the LOAD state needs once the acknowledge arrives, after
/// the instruction register may no longer be consulted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStaging {
    /// Destination register.
    pub rd: usize,
    /// Sign-extend the loaded lane.
    pub signed: bool,
    /// Transfer width.
    pub width: MemWidth,
    /// Byte offset of the address within its word.
    pub offset: u32,
}

/// Side effects of executing one instruction in DECODE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Execution {
    /// The instruction completes this cycle.
    Retire {
        /// Register write port for this cycle.
        write: WritePort,
        /// PC of the next instruction.
        next_pc: u32,
        /// A jump was made or a branch was taken.
        taken: bool,
        /// Condition reported by the instruction, if any.
        condition: Option<Condition>,
    },
    /// A load issues a bus read and waits in LOAD.
    Load {
        /// Read request to drive.
        request: BusMaster,
        /// Staging latched for the LOAD state.
        staging: LoadStaging,
    },
    /// A store issues a bus write and waits in STORE.
    Store {
        /// Write request to drive.
        request: BusMaster,
    },
}

/// Executes a decoded instruction.
///
/// # Arguments
///
/// * `d`    - The decoded instruction register.
/// * `pc`   - Address of the instruction; stable for the whole of DECODE.
/// * `regs` - The register file, read with last-edge values.
///
/// # Returns
///
/// The side effects to commit on the next clock edge.
pub fn execute(d: &Decoded, pc: u32, regs: &RegisterFile) -> Execution {
    let fallthrough = Bru::fallthrough(pc);
    let ctrl = match decode_control(d) {
        Ok(ctrl) => ctrl,
        Err(condition) => {
            return Execution::Retire {
                write: WritePort::default(),
                next_pc: fallthrough,
                taken: false,
                condition: Some(condition),
            };
        }
    };

    let rs1 = regs.read(d.rs1);
    let (op_a, op_b) = operands(&ctrl, d, pc, regs);

    if ctrl.mem_read || ctrl.mem_write {
        let addr = Alu::execute(AluOp::Add, op_a, op_b);
        let sel = Lsu::byte_select(ctrl.width, addr);
        if ctrl.mem_write {
            let data = Lsu::align_store(ctrl.width, addr, rs1);
            return Execution::Store {
                request: BusMaster::write(addr, data, sel),
            };
        }
        return Execution::Load {
            request: BusMaster::read(addr, sel),
            staging: LoadStaging {
                rd: d.rd,
                signed: ctrl.signed_load,
                width: ctrl.width,
                offset: Lsu::byte_offset(addr),
            },
        };
    }

    let (result, target) = if ctrl.jump {
        let target = if ctrl.jump_reg {
            Bru::register_target(rs1, d.imm)
        } else {
            Bru::relative_target(pc, d.imm)
        };
        (fallthrough, Some(target))
    } else if ctrl.branch {
        let taken = Bru::taken(ctrl.cond, op_a, op_b);
        (0, taken.then(|| Bru::relative_target(pc, d.imm)))
    } else {
        (Alu::execute(ctrl.alu, op_a, op_b), None)
    };

    let condition = target
        .filter(|t| Bru::is_misaligned(*t))
        .map(|target| Condition::MisalignedTarget { target });

    Execution::Retire {
        write: if ctrl.reg_write {
            WritePort::write(d.rd, result)
        } else {
            WritePort::default()
        },
        next_pc: target.unwrap_or(fallthrough),
        taken: target.is_some(),
        condition,
    }
}

/// Selects the ALU operands.
fn operands(ctrl: &ControlSignals, d: &Decoded, pc: u32, regs: &RegisterFile) -> (u32, u32) {
    let a = match ctrl.a_src {
        OpASrc::Reg1 => regs.read(d.rs1),
        OpASrc::Pc => pc,
        OpASrc::Zero => 0,
        OpASrc::Base => regs.read(d.base),
    };
    let b = match ctrl.b_src {
        OpBSrc::Imm => d.imm as u32,
        OpBSrc::ImmUnsigned => d.imm_unsigned,
        OpBSrc::Reg2 => regs.read(d.rs2),
    };
    (a, b)
}
