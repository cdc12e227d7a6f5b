//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the simulator. It provides:
//! 1. **Cycles and CPI:** Total cycles, retired instructions, and derived cycles per instruction.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump, system, unimplemented).
//! 3. **Control flow:** Taken branches and jumps.
//! 4. **Bus:** Completed reads and writes, and cycles spent waiting at each wait point.

use std::fmt;

use crate::common::data::AccessType;
use crate::common::error::Condition;
use crate::core::cpu::execution::Cycle;
use crate::core::control::Retired;
use crate::isa::instruction::Opcode;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions completed.
    pub instructions_retired: u64,

    /// Count of ALU instructions (register and immediate forms, LUI, AUIPC) retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of JAL/JALR retired.
    pub inst_jump: u64,
    /// Count of FENCE and SYSTEM instructions retired (all inert).
    pub inst_system: u64,
    /// Count of instructions that retired as no-ops due to an undefined encoding.
    pub inst_unimplemented: u64,

    /// Conditional branches that were taken.
    pub branches_taken: u64,
    /// Jumps and taken branches whose target was not word-aligned.
    pub misaligned_targets: u64,

    /// Completed bus reads (fetches and loads).
    pub bus_reads: u64,
    /// Completed bus writes.
    pub bus_writes: u64,
    /// Cycles spent waiting for a fetch acknowledge.
    pub wait_fetch: u64,
    /// Cycles spent waiting for a load acknowledge.
    pub wait_load: u64,
    /// Cycles spent waiting for a store acknowledge.
    pub wait_store: u64,
}

impl SimStats {
    /// Folds one clock cycle into the statistics.
    pub fn record(&mut self, cycle: &Cycle) {
        self.cycles += 1;

        if let Some(out) = cycle.outstanding {
            if cycle.response.ack {
                match out.access {
                    AccessType::Fetch | AccessType::Read => self.bus_reads += 1,
                    AccessType::Write => self.bus_writes += 1,
                }
            } else {
                match out.access {
                    AccessType::Fetch => self.wait_fetch += 1,
                    AccessType::Read => self.wait_load += 1,
                    AccessType::Write => self.wait_store += 1,
                }
            }
        }

        if let Some(r) = &cycle.retired {
            self.retire(r);
        }
    }

    fn retire(&mut self, r: &Retired) {
        self.instructions_retired += 1;
        match r.condition {
            Some(Condition::UnrecognizedOpcode { .. } | Condition::UnsupportedFunction { .. }) => {
                self.inst_unimplemented += 1;
                return;
            }
            Some(Condition::MisalignedTarget { .. }) => self.misaligned_targets += 1,
            _ => {}
        }

        match r.class {
            Some(Opcode::Op | Opcode::OpImm | Opcode::Lui | Opcode::Auipc) => self.inst_alu += 1,
            Some(Opcode::Load) => self.inst_load += 1,
            Some(Opcode::Store) => self.inst_store += 1,
            Some(Opcode::Branch) => {
                self.inst_branch += 1;
                if r.taken {
                    self.branches_taken += 1;
                }
            }
            Some(Opcode::Jal | Opcode::Jalr) => self.inst_jump += 1,
            Some(Opcode::MiscMem | Opcode::System) => self.inst_system += 1,
            None => self.inst_unimplemented += 1,
        }
    }

    /// Returns cycles per instruction, or `0.0` before the first retirement.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints all statistics to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instr = self.instructions_retired.max(1) as f64;
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;
        let rule = "----------------------------------------------------------";

        writeln!(f, "==========================================================")?;
        writeln!(f, "RV32I MULTI-CYCLE CORE STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "{rule}")?;
        writeln!(f, "INSTRUCTION MIX")?;
        for (name, n) in [
            ("op.alu", self.inst_alu),
            ("op.load", self.inst_load),
            ("op.store", self.inst_store),
            ("op.branch", self.inst_branch),
            ("op.jump", self.inst_jump),
            ("op.system", self.inst_system),
            ("op.unimplemented", self.inst_unimplemented),
        ] {
            writeln!(f, "  {name:<22} {n} ({:.2}%)", pct(n, instr))?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "CONTROL FLOW")?;
        writeln!(f, "  branch.taken           {}", self.branches_taken)?;
        writeln!(f, "  target.misaligned      {}", self.misaligned_targets)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "BUS")?;
        writeln!(f, "  bus.reads              {}", self.bus_reads)?;
        writeln!(f, "  bus.writes             {}", self.bus_writes)?;
        for (name, n) in [
            ("wait.fetch", self.wait_fetch),
            ("wait.load", self.wait_load),
            ("wait.store", self.wait_store),
        ] {
            writeln!(f, "  {name:<22} {n} ({:.2}%)", pct(n, cyc))?;
        }
        writeln!(f, "==========================================================")
    }
}
