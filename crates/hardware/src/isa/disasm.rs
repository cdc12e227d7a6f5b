//! Instruction Disassembler for RV32I.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for instruction traces, the CLI listing, and test diagnostics.
//! Branch and jump offsets are printed relative to the instruction.
//!
//! # Usage
//!
//! ```
//! use rv32mc_core::isa::disasm::disassemble;
//! let text = disassemble(0x00A00513); // ADDI x10, x0, 10
//! assert_eq!(text, "addi a0, zero, 10");
//! ```

use crate::isa::abi::name as xreg;
use crate::isa::decode::decode;
use crate::isa::instruction::{Decoded, Opcode};
use crate::isa::rv32i::{funct3 as f3, funct7 as f7};

/// SYSTEM immediate selecting EBREAK (ECALL is zero).
const EBREAK_IMM: i32 = 1;

/// Shift amount field mask for immediate shifts.
const SHAMT_MASK: u32 = 0x1F;

/// Disassembles a 32-bit RV32I instruction into a human-readable string.
///
/// Returns a mnemonic like `"add a0, a1, a2"` or `"unknown"` for
/// unrecognised encodings.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    let d = decode(inst);
    let Some(class) = d.class else {
        return "unknown".to_string();
    };

    match class {
        Opcode::Lui => format!("lui {}, {:#x}", xreg(d.rd), (d.imm as u32) >> 12),
        Opcode::Auipc => format!("auipc {}, {:#x}", xreg(d.rd), (d.imm as u32) >> 12),
        Opcode::Jal => format!("jal {}, {}", xreg(d.rd), d.imm),
        Opcode::Jalr => format!("jalr {}, {}({})", xreg(d.rd), d.imm, xreg(d.rs1)),
        Opcode::Branch => disasm_branch(&d),
        Opcode::Load => {
            let mn = match d.funct3 {
                f3::LB => "lb",
                f3::LH => "lh",
                f3::LW => "lw",
                f3::LBU => "lbu",
                f3::LHU => "lhu",
                _ => "l??",
            };
            format!("{mn} {}, {}({})", xreg(d.rd), d.imm, xreg(d.base))
        }
        Opcode::Store => {
            let mn = match d.funct3 {
                f3::SB => "sb",
                f3::SH => "sh",
                f3::SW => "sw",
                _ => "s??",
            };
            format!("{mn} {}, {}({})", xreg(d.rs1), d.imm, xreg(d.base))
        }
        Opcode::OpImm => disasm_op_imm(&d),
        Opcode::Op => disasm_op_reg(&d),
        Opcode::MiscMem => "fence".to_string(),
        Opcode::System => {
            if d.funct3 == 0 && d.rd == 0 && d.rs1 == 0 {
                match d.imm {
                    0 => "ecall".to_string(),
                    EBREAK_IMM => "ebreak".to_string(),
                    _ => format!("system {inst:#010x}"),
                }
            } else {
                format!("system {inst:#010x}")
            }
        }
    }
}

/// Renders a conditional branch.
fn disasm_branch(d: &Decoded) -> String {
    let mn = match d.funct3 {
        f3::BEQ => "beq",
        f3::BNE => "bne",
        f3::BLT => "blt",
        f3::BGE => "bge",
        f3::BLTU => "bltu",
        f3::BGEU => "bgeu",
        _ => "b??",
    };
    format!("{mn} {}, {}, {}", xreg(d.rs1), xreg(d.rs2), d.imm)
}

/// Renders an immediate ALU operation.
fn disasm_op_imm(d: &Decoded) -> String {
    let shamt = d.imm_unsigned & SHAMT_MASK;
    let (rd, rs1) = (xreg(d.rd), xreg(d.rs1));
    match d.funct3 {
        f3::ADD_SUB => format!("addi {rd}, {rs1}, {}", d.imm),
        f3::SLT => format!("slti {rd}, {rs1}, {}", d.imm),
        f3::SLTU => format!("sltiu {rd}, {rs1}, {}", d.imm),
        f3::XOR => format!("xori {rd}, {rs1}, {}", d.imm),
        f3::OR => format!("ori {rd}, {rs1}, {}", d.imm),
        f3::AND => format!("andi {rd}, {rs1}, {}", d.imm),
        f3::SLL => format!("slli {rd}, {rs1}, {shamt}"),
        f3::SRL_SRA => {
            let mn = if (d.raw >> 25) & f7::ALT_BIT != 0 { "srai" } else { "srli" };
            format!("{mn} {rd}, {rs1}, {shamt}")
        }
        _ => "op-imm??".to_string(),
    }
}

/// Renders a register-register ALU operation.
fn disasm_op_reg(d: &Decoded) -> String {
    let mn = match (d.funct3, d.funct7) {
        (f3::ADD_SUB, f7::DEFAULT) => "add",
        (f3::ADD_SUB, f7::SUB) => "sub",
        (f3::SLL, f7::DEFAULT) => "sll",
        (f3::SLT, f7::DEFAULT) => "slt",
        (f3::SLTU, f7::DEFAULT) => "sltu",
        (f3::XOR, f7::DEFAULT) => "xor",
        (f3::SRL_SRA, f7::DEFAULT) => "srl",
        (f3::SRL_SRA, f7::SRA) => "sra",
        (f3::OR, f7::DEFAULT) => "or",
        (f3::AND, f7::DEFAULT) => "and",
        _ => "op??",
    };
    format!("{mn} {}, {}, {}", xreg(d.rd), xreg(d.rs1), xreg(d.rs2))
}
