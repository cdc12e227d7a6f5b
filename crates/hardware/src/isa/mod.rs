//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the RV32I opcode and function-code tables, field extraction,
//! the combinational decoder, and the disassembler used for tracing.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding logic for all RV32I instruction formats.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;

pub use self::decode::decode;
pub use self::instruction::{Decoded, Format, InstructionBits, Opcode};
