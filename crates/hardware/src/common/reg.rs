//! Register File with a synchronous write port.
//!
//! This module provides the `RegisterFile` struct used by the controller. It provides:
//! 1. **Read Ports:** Combinational reads that observe the value committed at the last edge.
//! 2. **Write Port:** A single enable-gated port applied on the clock edge.
//! 3. **Observability:** The last committed write and a register dump for tracing.

use std::fmt;

use crate::common::constants::REG_COUNT;
use crate::core::arch::gpr::Gpr;
use crate::isa::abi;

/// A register write committed on a clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegWrite {
    /// Destination register index.
    pub index: usize,
    /// Value written.
    pub value: u32,
}

/// The register file's single write port, as driven for one cycle.
///
/// The port is disabled by default; the controller enables it for exactly one
/// cycle per instruction that produces a register result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritePort {
    /// Write enable.
    pub enable: bool,
    /// Destination register index.
    pub index: usize,
    /// Value to write.
    pub value: u32,
}

impl WritePort {
    /// Returns a port driving `value` into register `index`.
    pub const fn write(index: usize, value: u32) -> Self {
        Self {
            enable: true,
            index,
            value,
        }
    }

    /// Returns the write carried by this port, if enabled.
    pub const fn as_write(&self) -> Option<RegWrite> {
        if self.enable {
            Some(RegWrite {
                index: self.index,
                value: self.value,
            })
        } else {
            None
        }
    }
}

/// Register file: 32 × 32-bit storage with two read ports and one write port.
///
/// Reads never see a write driven in the same cycle; the write becomes
/// visible after [`RegisterFile::clock`].
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    gpr: Gpr,
    last_write: Option<RegWrite>,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    ///
    /// # Returns
    ///
    /// The value committed at the most recent clock edge.
    pub fn read(&self, idx: usize) -> u32 {
        self.gpr.read(idx)
    }

    /// Applies the write port on a clock edge.
    ///
    /// A disabled port leaves the file untouched. An enabled port targeting
    /// `x0` is accepted and recorded but never reads back as nonzero.
    ///
    /// # Arguments
    ///
    /// * `port` - The write port as driven during the cycle that just ended.
    pub fn clock(&mut self, port: WritePort) {
        if let Some(write) = port.as_write() {
            self.gpr.write(write.index, write.value);
            self.last_write = Some(write);
        }
    }

    /// Writes a register directly, outside of the clocked port.
    ///
    /// Used by the loader and test harnesses to seed initial state; it does
    /// not update [`RegisterFile::last_write`].
    pub fn poke(&mut self, idx: usize, val: u32) {
        self.gpr.write(idx, val);
    }

    /// Returns the last write committed through the port, if any.
    pub const fn last_write(&self) -> Option<RegWrite> {
        self.last_write
    }

    /// Returns a snapshot of all 32 registers.
    pub fn snapshot(&self) -> [u32; REG_COUNT] {
        self.gpr.snapshot()
    }
}

impl fmt::Display for RegisterFile {
    /// Formats the register file as four registers per line with ABI names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regs = self.snapshot();
        for row in (0..REG_COUNT).step_by(4) {
            for i in row..row + 4 {
                write!(f, "x{i:<2} {:>4} = {:#010x}  ", abi::name(i), regs[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
