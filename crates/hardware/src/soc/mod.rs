//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components around the core: the
//! request/acknowledge bus it masters and the word-addressed memory that
//! answers it.

/// Request/acknowledge bus signals and the bus target trait.
pub mod bus;

/// Word-addressed memory with wait states.
pub mod memory;

pub use bus::{BusMaster, BusResponse, BusTarget};
pub use memory::Memory;
