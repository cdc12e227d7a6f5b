//! Simulator errors and architectural conditions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Conditions:** The documented gaps of the core (unrecognized opcodes, inert
//!    FENCE/SYSTEM, misaligned targets), reported per instruction instead of trapping.
//! 2. **Simulator Errors:** Failures of the driver around the core: loading images,
//!    parsing configuration, and bus transactions that never complete.

use thiserror::Error;

use crate::common::data::AccessType;
use crate::isa::instruction::Opcode;

/// Architectural condition observed while retiring an instruction.
///
/// The core has no trap mechanism. Each of these is attached to the
/// retirement record of the instruction that raised it, so callers can assert
/// on it. None of them alters control flow: the instruction completes as a
/// no-op (or, for `MisalignedTarget`, still jumps).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Condition {
    /// The opcode is not part of RV32I. No register is written.
    #[error("unrecognized opcode {opcode:#09b} in {raw:#010x}")]
    UnrecognizedOpcode {
        /// Raw instruction word.
        raw: u32,
        /// The 7-bit opcode field.
        opcode: u32,
    },

    /// The opcode is known but its funct3/funct7 pairing is undefined.
    #[error("undefined {class} encoding funct3={funct3:#05b} funct7={funct7:#09b} in {raw:#010x}")]
    UnsupportedFunction {
        /// Raw instruction word.
        raw: u32,
        /// Opcode class of the instruction.
        class: Opcode,
        /// The funct3 field.
        funct3: u32,
        /// The funct7 field (zero outside R-type).
        funct7: u32,
    },

    /// A jump or taken branch computed a target that is not word-aligned.
    #[error("control transfer to misaligned target {target:#010x}")]
    MisalignedTarget {
        /// The computed target address.
        target: u32,
    },

    /// FENCE executed; memory ordering is trivially satisfied and nothing happens.
    #[error("FENCE is inert")]
    InertFence,

    /// ECALL, EBREAK or a CSR access executed; no privileged state exists.
    #[error("SYSTEM instruction {raw:#010x} is inert")]
    InertSystem {
        /// Raw instruction word.
        raw: u32,
    },
}

/// Errors returned by the simulator, loader and configuration layers.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program image looked like ELF but could not be parsed.
    #[error("invalid ELF image: {0}")]
    Elf(String),

    /// The ELF image is not a 32-bit RISC-V executable.
    #[error("unsupported ELF image: expected 32-bit RISC-V, found {0}")]
    UnsupportedImage(String),

    /// Part of the program image does not fit in memory.
    #[error("image data at {addr:#010x} (+{len:#x} bytes) lies outside memory {base:#010x} (+{size:#x} bytes)")]
    ImageOutOfRange {
        /// Start address of the data.
        addr: u32,
        /// Length of the data in bytes.
        len: usize,
        /// Memory base address.
        base: u32,
        /// Memory size in bytes.
        size: usize,
    },

    /// The configuration could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The cycle budget ran out while a bus transaction was still outstanding.
    #[error("bus stalled: {access:?} at {addr:#010x} unacknowledged for {cycles} cycles")]
    BusStall {
        /// Kind of the outstanding transaction.
        access: AccessType,
        /// Address of the outstanding transaction.
        addr: u32,
        /// Cycles spent waiting for the acknowledge.
        cycles: u64,
    },

    /// The cycle budget ran out without the program halting.
    #[error("cycle limit of {limit} reached at pc {pc:#010x}")]
    CycleLimit {
        /// Configured limit.
        limit: u64,
        /// Program counter when the limit was reached.
        pc: u32,
    },
}

/// Result type used throughout the simulator.
pub type SimResult<T> = Result<T, SimError>;
