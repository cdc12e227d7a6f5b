//! Configuration system for the RV32I simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline constants (reset PC, memory map, cycle budget).
//! 2. **Structures:** Hierarchical config for general settings and memory.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; missing fields take their default.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
///
/// These values define the baseline configuration when not explicitly
/// overridden in a JSON configuration file.
mod defaults {
    /// Reset value of the program counter.
    pub const START_PC: u32 = 0x0000_0000;

    /// Cycle budget for `Simulator::run` (10 million cycles).
    pub const MAX_CYCLES: u64 = 10_000_000;

    /// Base address of memory.
    pub const MEM_BASE: u32 = 0x0000_0000;

    /// Memory size in bytes (64 KiB).
    pub const MEM_SIZE: usize = 64 * 1024;

    /// Cycles the memory holds off acknowledge for each request.
    pub const WAIT_STATES: u32 = 0;
}

/// Root configuration structure for the simulator.
///
/// # Examples
///
/// ```
/// use rv32mc_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "max_cycles": 5000 },
///     "memory": { "size_bytes": 4096, "wait_states": 2 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.max_cycles, 5000);
/// assert_eq!(config.general.start_pc, 0);
/// assert_eq!(config.memory.size_bytes, 4096);
/// assert_eq!(config.memory.wait_states, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory map and timing
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the JSON is malformed or has mistyped fields.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be read, [`SimError::Config`] if it
    /// does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log every retired instruction at debug level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Reset value of the PC (overridden by an ELF entry point).
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Cycles `run` may spend before giving up.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    const fn default_start_pc() -> u32 {
        defaults::START_PC
    }

    /// Returns the default cycle budget.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::START_PC,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Base address of memory
    #[serde(default = "MemoryConfig::default_base")]
    pub base: u32,

    /// Size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,

    /// Wait states before each acknowledge
    #[serde(default = "MemoryConfig::default_wait_states")]
    pub wait_states: u32,
}

impl MemoryConfig {
    /// Returns the default memory base address.
    const fn default_base() -> u32 {
        defaults::MEM_BASE
    }

    /// Returns the default memory size in bytes.
    const fn default_size() -> usize {
        defaults::MEM_SIZE
    }

    /// Returns the default number of wait states.
    const fn default_wait_states() -> u32 {
        defaults::WAIT_STATES
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            base: defaults::MEM_BASE,
            size_bytes: defaults::MEM_SIZE,
            wait_states: defaults::WAIT_STATES,
        }
    }
}
