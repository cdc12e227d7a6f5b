//! RISC-V General-Purpose Register storage.
//!
//! This module implements the General-Purpose Register (GPR) storage for RV32I.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`), 32 bits each.
//! 2. **Invariant Enforcement:** Ensures that register `x0` always reads as zero.

use crate::common::constants::REG_COUNT;

/// General-Purpose Register storage.
///
/// Contains 32 general-purpose registers used for integer operations. Register `x0`
/// is hardwired to zero: writes to it are accepted and discarded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; REG_COUNT],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a snapshot of all registers, with `x0` reported as zero.
    pub fn snapshot(&self) -> [u32; REG_COUNT] {
        let mut out = self.regs;
        out[0] = 0;
        out
    }
}
