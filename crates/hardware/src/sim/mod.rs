//! Simulation driver and program loading.
//!
//! Provides the loader that places program images in memory and the
//! `Simulator` that clocks the core against its memory until the program
//! halts or the cycle budget runs out.

/// Program image loading (flat binaries and ELF32).
pub mod loader;

/// Top-level simulator and run loop.
pub mod simulator;
