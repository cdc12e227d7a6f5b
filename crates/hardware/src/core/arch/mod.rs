//! RISC-V architectural state.
//!
//! RV32I carries no privileged state in this core: the only architectural
//! storage besides the PC is the general-purpose register file.

/// General-Purpose Register storage.
pub mod gpr;
