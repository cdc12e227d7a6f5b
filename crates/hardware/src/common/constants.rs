//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Architectural Constants:** Register count and word/instruction widths.
//! 2. **Bus Constants:** Byte-lane and word-index helpers for the 32-bit data bus.
//! 3. **Simulation Constants:** Thresholds and intervals for simulation control.

/// Number of general-purpose registers in RV32I.
pub const REG_COUNT: usize = 32;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of bytes in a bus word.
pub const WORD_BYTES: u32 = 4;

/// Shift that converts a byte address into a word index.
pub const WORD_SHIFT: u32 = 2;

/// Mask selecting the byte offset of an address within its word.
pub const BYTE_OFFSET_MASK: u32 = WORD_BYTES - 1;

/// Byte-select value enabling all four lanes of the data bus.
pub const SEL_ALL: u8 = 0b1111;

/// Number of cycles between progress messages during long runs.
pub const STATUS_UPDATE_INTERVAL: u64 = 5_000_000;
