//! Request/acknowledge bus between the controller and its memory.
//!
//! This module defines the single-master, single-target handshake. It provides:
//! 1. **Master Signals:** `BusMaster`, the registered request lines driven by the controller.
//! 2. **Target Response:** `BusResponse`, the acknowledge and read data returned each cycle.
//! 3. **Target Trait:** `BusTarget`, implemented by anything that can answer a request.
//!
//! A transaction starts when the master raises `cyc` and `stb` with the address,
//! direction, write data and byte select. The target raises `ack` for exactly
//! one cycle; the master drops its request the cycle after observing it. There
//! is no burst, pipelining, retry or error signaling.

use std::fmt;

use crate::common::constants::SEL_ALL;
use crate::common::data::AccessType;

/// Request lines driven by the bus master, as registered at the last clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusMaster {
    /// Bus cycle in progress.
    pub cyc: bool,
    /// Strobe: the address and data lines are valid.
    pub stb: bool,
    /// Write enable (`false` for reads).
    pub we: bool,
    /// Byte address of the transfer.
    pub addr: u32,
    /// Write data, already positioned in its byte lanes.
    pub data: u32,
    /// Byte-lane select, one bit per byte of `data`.
    pub sel: u8,
}

impl BusMaster {
    /// Returns a master with every line deasserted.
    pub const fn idle() -> Self {
        Self {
            cyc: false,
            stb: false,
            we: false,
            addr: 0,
            data: 0,
            sel: 0,
        }
    }

    /// Returns a read request.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address to read.
    /// * `sel`  - Byte lanes of interest.
    pub const fn read(addr: u32, sel: u8) -> Self {
        Self {
            cyc: true,
            stb: true,
            we: false,
            addr,
            data: 0,
            sel,
        }
    }

    /// Returns a full-word read request, as used by instruction fetch.
    pub const fn fetch(addr: u32) -> Self {
        Self::read(addr, SEL_ALL)
    }

    /// Returns a write request.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address to write.
    /// * `data` - Write data positioned in its lanes.
    /// * `sel`  - Byte lanes to update.
    pub const fn write(addr: u32, data: u32, sel: u8) -> Self {
        Self {
            cyc: true,
            stb: true,
            we: true,
            addr,
            data,
            sel,
        }
    }

    /// Returns `true` while a transaction is being requested.
    pub const fn is_active(&self) -> bool {
        self.cyc && self.stb
    }
}

impl fmt::Display for BusMaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_active() {
            return f.write_str("idle");
        }
        if self.we {
            write!(
                f,
                "write {:#010x} <- {:#010x} sel={:04b}",
                self.addr, self.data, self.sel
            )
        } else {
            write!(f, "read {:#010x} sel={:04b}", self.addr, self.sel)
        }
    }
}

/// Signals driven by the bus target for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusResponse {
    /// Transaction complete; asserted for exactly one cycle.
    pub ack: bool,
    /// Read data, valid only while `ack` is asserted on a read.
    pub data: u32,
}

impl BusResponse {
    /// No acknowledge this cycle.
    pub const fn wait() -> Self {
        Self { ack: false, data: 0 }
    }

    /// Acknowledge carrying `data`.
    pub const fn ack(data: u32) -> Self {
        Self { ack: true, data }
    }
}

/// A component that answers bus requests.
///
/// `respond` is called exactly once per cycle with the master's registered
/// signals, including idle cycles, so the target can track when a request
/// is withdrawn.
pub trait BusTarget {
    /// Produces this cycle's response to the master's request lines.
    ///
    /// # Arguments
    ///
    /// * `req` - The master signals registered at the last clock edge.
    ///
    /// # Returns
    ///
    /// The acknowledge and read data for this cycle.
    fn respond(&mut self, req: &BusMaster) -> BusResponse;
}

impl<T: BusTarget + ?Sized> BusTarget for Box<T> {
    fn respond(&mut self, req: &BusMaster) -> BusResponse {
        (**self).respond(req)
    }
}

/// An outstanding transaction as seen by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outstanding {
    /// Which wait point issued the transaction.
    pub access: AccessType,
    /// Address of the request.
    pub addr: u32,
}
