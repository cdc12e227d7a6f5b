//! Main Execution Loop.
//!
//! This module implements one clock cycle of the core. It performs the following:
//! 1. **Bus Sampling:** Presents the registered request to the target and samples its response.
//! 2. **Next-State Evaluation:** Runs the pure controller step on the sampled response.
//! 3. **Commit:** Applies the register write port and the next controller state on the edge.
//! 4. **Observability:** Emits per-instruction traces and condition notices through `tracing`.

use tracing::{debug, trace, warn};

use super::Cpu;
use crate::common::error::Condition;
use crate::core::control::{Retired, step};
use crate::isa::disasm::disassemble;
use crate::soc::bus::{BusResponse, BusTarget, Outstanding};

/// What happened during one clock cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cycle {
    /// Transaction outstanding at the start of the cycle.
    pub outstanding: Option<Outstanding>,
    /// The target's response this cycle.
    pub response: BusResponse,
    /// Instruction completed at the end of the cycle.
    pub retired: Option<Retired>,
}

impl Cpu {
    /// Advances the core by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `target` - The bus target; it is asked to respond exactly once.
    ///
    /// # Returns
    ///
    /// A summary of the cycle for statistics and halt detection.
    pub fn tick<T: BusTarget + ?Sized>(&mut self, target: &mut T) -> Cycle {
        let outstanding = self.state.outstanding();
        let response = target.respond(&self.state.bus);
        let out = step(&self.state, &self.regs, response);

        self.regs.clock(out.write);
        self.state = out.next;

        if let Some(r) = out.retired {
            self.last_retired = Some(r);
            self.report(&r);
        }

        Cycle {
            outstanding,
            response,
            retired: out.retired,
        }
    }

    /// Logs a retired instruction.
    fn report(&self, r: &Retired) {
        if self.trace {
            match r.write {
                Some(w) => debug!(
                    "{:#010x}: {:08x}  {:<28} x{} <- {:#010x}",
                    r.pc,
                    r.raw,
                    disassemble(r.raw),
                    w.index,
                    w.value
                ),
                None => debug!("{:#010x}: {:08x}  {}", r.pc, r.raw, disassemble(r.raw)),
            }
        } else {
            trace!(pc = r.pc, raw = r.raw, next_pc = r.next_pc, "retired");
        }

        match r.condition {
            Some(c @ (Condition::UnrecognizedOpcode { .. } | Condition::UnsupportedFunction { .. })) => {
                warn!("{:#010x}: {c}; executed as a no-op", r.pc);
            }
            Some(c) => debug!("{:#010x}: {c}", r.pc),
            None => {}
        }
    }
}
