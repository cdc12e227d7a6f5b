//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which holds the entire
//! architectural and microarchitectural state of the core. It coordinates:
//! 1. **State Management:** Program counter, instruction register, FSM state and load staging.
//! 2. **Register File:** The 32 general-purpose registers behind a clocked write port.
//! 3. **Observability:** Accessors for the PC, FSM state, decoded instruction, registered
//!    bus request, last register write and last retirement record.

/// Clocking of the controller against a bus target.
pub mod execution;

use crate::common::reg::{RegWrite, RegisterFile};
use crate::config::Config;
use crate::core::control::{CoreState, Retired, State};
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::soc::bus::{BusMaster, Outstanding};

/// The multi-cycle RV32I core.
///
/// `Cpu` owns the registered controller state and the register file. It does
/// not own memory: each [`Cpu::tick`] is given the bus target to talk to.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose register file.
    pub regs: RegisterFile,
    /// Registered controller state.
    pub(crate) state: CoreState,
    /// Most recent retirement record.
    pub(crate) last_retired: Option<Retired>,
    /// Enable per-instruction tracing.
    pub trace: bool,
}

impl Cpu {
    /// Creates a core in reset with the PC at `start_pc`.
    pub fn new(start_pc: u32) -> Self {
        Self {
            regs: RegisterFile::new(),
            state: CoreState::reset(start_pc),
            last_retired: None,
            trace: cfg!(feature = "always-trace"),
        }
    }

    /// Creates a core from the simulator configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut cpu = Self::new(config.general.start_pc);
        cpu.trace |= config.general.trace_instructions;
        cpu
    }

    /// Returns the core to its reset state at `start_pc`.
    ///
    /// Registers are cleared; the trace setting is kept.
    pub fn reset(&mut self, start_pc: u32) {
        self.regs = RegisterFile::new();
        self.state = CoreState::reset(start_pc);
        self.last_retired = None;
    }

    /// Returns the program counter.
    pub const fn pc(&self) -> u32 {
        self.state.pc
    }

    /// Sets the program counter.
    ///
    /// Only meaningful while the core is in FETCH with an idle bus; used by
    /// the loader to apply an image entry point.
    pub const fn set_pc(&mut self, pc: u32) {
        self.state.pc = pc;
    }

    /// Returns the current FSM state.
    pub const fn state(&self) -> State {
        self.state.state
    }

    /// Returns the instruction register.
    pub const fn ir(&self) -> u32 {
        self.state.ir
    }

    /// Returns the decoded fields of the instruction register.
    pub fn decoded(&self) -> Decoded {
        decode(self.state.ir)
    }

    /// Returns the registered bus request lines.
    pub const fn bus(&self) -> &BusMaster {
        &self.state.bus
    }

    /// Returns the outstanding bus transaction, if any.
    pub fn outstanding(&self) -> Option<Outstanding> {
        self.state.outstanding()
    }

    /// Returns the last register write committed through the write port.
    pub const fn last_write(&self) -> Option<RegWrite> {
        self.regs.last_write()
    }

    /// Returns the record of the most recently completed instruction.
    pub const fn last_retired(&self) -> Option<&Retired> {
        self.last_retired.as_ref()
    }

    /// Returns the full registered controller state.
    pub const fn core_state(&self) -> &CoreState {
        &self.state
    }
}
