//! Memory Access Types.
//!
//! This module defines the classification of bus transactions issued by the core.
//! These types are used for the following:
//! 1. **Bus Tracing:** Tagging each request with the wait point that issued it.
//! 2. **Statistics Tracking:** Separating fetch, load and store traffic and wait cycles.

/// Type of bus access issued by the controller.
///
/// The single-ported memory serves all three; the controller guarantees that
/// only one of them is outstanding at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Instruction fetch at the current PC.
    Fetch,

    /// Data read issued by a load instruction.
    Read,

    /// Data write issued by a store instruction.
    Write,
}

/// Width of a data transfer on the bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// 8-bit transfer (LB, LBU, SB).
    Byte,
    /// 16-bit transfer (LH, LHU, SH).
    Half,
    /// 32-bit transfer (LW, SW, instruction fetch).
    #[default]
    Word,
}

impl MemWidth {
    /// Returns the transfer size in bytes.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}
