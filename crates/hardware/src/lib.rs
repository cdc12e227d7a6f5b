//! Cycle-accurate multi-cycle RV32I core.
//!
//! This crate implements a non-pipelined RV32I processor core that talks to a
//! single-ported memory over a request/acknowledge bus:
//! 1. **Core:** Controller FSM (fetch, decode/execute, load, store), register file and datapath.
//! 2. **ISA:** Decoding and disassembly of the RV32I base instruction set.
//! 3. **SoC:** The Wishbone-style bus signals and a word-addressed memory with wait states.
//! 4. **Simulation:** Loader, configuration, run loop and statistics collection.
//!
//! # Example
//!
//! ```
//! use rv32mc_core::{Config, ExitReason, Simulator};
//!
//! // addi x1, x0, 5 ; addi x2, x1, 3 ; j .
//! let program: Vec<u8> = [0x0050_0093u32, 0x0030_8113, 0x0000_006F]
//!     .iter()
//!     .flat_map(|w| w.to_le_bytes())
//!     .collect();
//!
//! let (mut sim, _) = Simulator::with_image(&Config::default(), &program).unwrap();
//! assert_eq!(sim.run().unwrap(), ExitReason::SelfLoop { pc: 8 });
//! assert_eq!(sim.cpu.regs.read(2), 8);
//! ```

/// Common types and constants (register file, access types, errors).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// CPU core (controller, datapath, execution units, registers).
pub mod core;
/// Instruction set (decode, instruction, ABI, RV32I tables, disassembly).
pub mod isa;
/// Program loader and simulator driver.
pub mod sim;
/// System-on-chip (bus signals, memory).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds the controller state and register file.
pub use crate::core::Cpu;
/// Top-level simulator; owns the core, memory and statistics.
pub use crate::sim::simulator::{ExitReason, Simulator};
/// Error type returned by fallible simulator operations.
pub use crate::common::error::{Condition, SimError, SimResult};
