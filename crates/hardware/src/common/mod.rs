//! Common utilities and types used throughout the RV32I simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Register count, word and instruction widths, bus lane masks.
//! 2. **Memory Access:** Classification of bus transactions (Fetch/Read/Write) and widths.
//! 3. **Error Handling:** Architectural conditions and simulator errors.
//! 4. **Register Management:** The register file and its clocked write port.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types and architectural conditions.
pub mod error;

/// Register file with a clocked write port.
pub mod reg;

pub use data::{AccessType, MemWidth};
pub use error::{Condition, SimError, SimResult};
pub use reg::{RegWrite, RegisterFile, WritePort};
