//! Core processor implementation.
//!
//! This module contains the multi-cycle core: the controller FSM, the
//! DECODE-state datapath, the control-signal generator, the execution units
//! and the `Cpu` that clocks them against a bus target.

/// Architecture-specific components (general-purpose registers).
pub mod arch;

/// Controller state machine and its pure next-state function.
pub mod control;

/// CPU core implementation and clocking.
pub mod cpu;

/// DECODE-state datapath: operand routing, control transfer and memory issue.
pub mod execute;

/// Control signals and their generation from decoded instructions.
pub mod signals;

/// Execution units (ALU, BRU, LSU).
pub mod units;

pub use self::control::{CoreState, Retired, State};
pub use self::cpu::Cpu;
pub use self::cpu::execution::Cycle;
