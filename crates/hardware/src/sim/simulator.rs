//! Simulator: owns the core, its memory and the statistics side-by-side.
//!
//! The simulator is the thin driver around the core. It clocks the `Cpu`
//! against the `Memory`, folds every cycle into `SimStats`, and decides when a
//! run is over: a retired jump or branch to its own address halts cleanly; an
//! exhausted cycle budget is an error, reported as a bus stall when the core
//! is waiting on an acknowledge the memory is overdue to give.

use std::fmt;

use tracing::{debug, info};

use crate::common::constants::STATUS_UPDATE_INTERVAL;
use crate::common::error::{SimError, SimResult};
use crate::config::Config;
use crate::core::{Cpu, Cycle};
use crate::sim::loader::{self, LoadedImage};
use crate::soc::memory::Memory;
use crate::stats::SimStats;

/// Why a run stopped without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The core retired a control transfer to its own address.
    SelfLoop {
        /// Address of the looping instruction.
        pc: u32,
    },
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop { pc } => write!(f, "halted in self-loop at {pc:#010x}"),
        }
    }
}

/// Top-level simulator: core, memory and statistics.
#[derive(Debug)]
pub struct Simulator {
    /// The core.
    pub cpu: Cpu,
    /// The memory answering the core's bus.
    pub mem: Memory,
    /// Statistics collected since construction or the last reset.
    pub stats: SimStats,
    max_cycles: u64,
    stall_since: Option<u64>,
}

impl Simulator {
    /// Creates a simulator with empty memory from a configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::from_config(config),
            mem: Memory::new(
                config.memory.base,
                config.memory.size_bytes,
                config.memory.wait_states,
            ),
            stats: SimStats::default(),
            max_cycles: config.general.max_cycles,
            stall_since: None,
        }
    }

    /// Creates a simulator and loads a program image into it.
    ///
    /// An ELF entry point overrides the configured start PC.
    ///
    /// # Errors
    ///
    /// Any error from [`loader::load_image`].
    pub fn with_image(config: &Config, image: &[u8]) -> SimResult<(Self, LoadedImage)> {
        let mut sim = Self::new(config);
        let loaded = loader::load_image(&mut sim.mem, image)?;
        if let Some(entry) = loaded.entry {
            sim.cpu.set_pc(entry);
        }
        Ok((sim, loaded))
    }

    /// Returns the cycle budget used by [`Simulator::run`].
    pub const fn max_cycles(&self) -> u64 {
        self.max_cycles
    }

    /// Sets the cycle budget used by [`Simulator::run`].
    pub const fn set_max_cycles(&mut self, max_cycles: u64) {
        self.max_cycles = max_cycles;
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) -> Cycle {
        let start = self.stats.cycles;
        let cycle = self.cpu.tick(&mut self.mem);
        self.stats.record(&cycle);
        if cycle.outstanding.is_some() && !cycle.response.ack {
            let _ = self.stall_since.get_or_insert(start);
        } else {
            self.stall_since = None;
        }
        if self.cpu.trace && self.stats.cycles.is_multiple_of(STATUS_UPDATE_INTERVAL) {
            info!(
                "[Status] cycles: {:>10} | pc: {:#010x} | state: {}",
                self.stats.cycles,
                self.cpu.pc(),
                self.cpu.state()
            );
        }
        cycle
    }

    /// Runs exactly `n` clock cycles.
    pub fn run_cycles(&mut self, n: u64) {
        for _ in 0..n {
            let _ = self.tick();
        }
    }

    /// Runs until `n` more instructions have completed.
    ///
    /// # Errors
    ///
    /// [`SimError::BusStall`] or [`SimError::CycleLimit`] if the cycle
    /// budget runs out first.
    pub fn run_instructions(&mut self, n: u64) -> SimResult<()> {
        let target = self.stats.instructions_retired.saturating_add(n);
        while self.stats.instructions_retired < target {
            self.check_budget()?;
            let _ = self.tick();
        }
        Ok(())
    }

    /// Runs until the program halts in a self-loop.
    ///
    /// # Errors
    ///
    /// [`SimError::BusStall`] if the budget runs out while a bus transaction
    /// has gone unacknowledged past the memory's wait states,
    /// [`SimError::CycleLimit`] otherwise.
    pub fn run(&mut self) -> SimResult<ExitReason> {
        loop {
            self.check_budget()?;
            let cycle = self.tick();
            if let Some(r) = cycle.retired.filter(|r| r.is_self_loop()) {
                let reason = ExitReason::SelfLoop { pc: r.pc };
                info!(
                    "{reason} after {} cycles, {} instructions",
                    self.stats.cycles, self.stats.instructions_retired
                );
                return Ok(reason);
            }
        }
    }

    /// Cycles the outstanding transaction has gone unacknowledged beyond the
    /// memory's wait states, or `None` if it is still within them.
    fn overdue(&self) -> Option<u64> {
        let waited = self.stats.cycles - self.stall_since?;
        (waited > u64::from(self.mem.wait_states())).then_some(waited)
    }

    fn check_budget(&self) -> SimResult<()> {
        if self.stats.cycles < self.max_cycles {
            return Ok(());
        }
        let err = match (self.cpu.outstanding(), self.overdue()) {
            (Some(out), Some(cycles)) => SimError::BusStall {
                access: out.access,
                addr: out.addr,
                cycles,
            },
            _ => SimError::CycleLimit {
                limit: self.max_cycles,
                pc: self.cpu.pc(),
            },
        };
        debug!("run stopped: {err}");
        Err(err)
    }
}
