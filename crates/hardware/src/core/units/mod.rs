//! Execution units and functional components.
//!
//! This module contains the combinational units the controller drives during
//! DECODE and the memory states: the ALU, the branch resolution unit and the
//! load/store lane logic.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit: comparisons and control-transfer targets.
pub mod bru;

/// Load/Store Unit: byte lanes and sign extension for sub-word accesses.
pub mod lsu;
