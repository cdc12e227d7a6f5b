//! Controller finite-state machine.
//!
//! The controller sequences one instruction at a time through
//! FETCH, DECODE and, for memory instructions, LOAD or STORE. Each cycle is
//! modeled as a pure function [`step`] from the registered state, the register
//! file and the bus response to the next state and the side effects to commit.
//!
//! Bus discipline:
//! 1. FETCH drives a read at PC when the bus is idle and waits for acknowledge
//!    while the request is outstanding.
//! 2. Every acknowledge releases the bus, so at least one idle cycle separates
//!    two requests and no more than one transaction is ever outstanding.
//! 3. The PC is written only when an instruction completes.

use std::fmt;

use crate::common::data::AccessType;
use crate::common::error::Condition;
use crate::common::reg::{RegWrite, RegisterFile, WritePort};
use crate::core::execute::{Execution, LoadStaging, execute};
use crate::core::units::bru::Bru;
use crate::core::units::lsu::Lsu;
use crate::isa::decode::decode;
use crate::isa::instruction::Opcode;
use crate::soc::bus::{BusMaster, BusResponse, Outstanding};

/// Controller states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Instruction fetch (READ_PC when the bus is idle, LOAD_PC while waiting).
    #[default]
    Fetch,
    /// Decode and execute the instruction register.
    Decode,
    /// Wait for the acknowledge of a load.
    Load,
    /// Wait for the acknowledge of a store.
    Store,
}

impl State {
    /// Returns the bus access this state waits on, if any.
    pub const fn access(self) -> Option<AccessType> {
        match self {
            Self::Fetch => Some(AccessType::Fetch),
            Self::Decode => None,
            Self::Load => Some(AccessType::Read),
            Self::Store => Some(AccessType::Write),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "FETCH",
            Self::Decode => "DECODE",
            Self::Load => "LOAD",
            Self::Store => "STORE",
        })
    }
}

/// Registered state of the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreState {
    /// Program counter of the instruction being processed.
    pub pc: u32,
    /// Instruction register.
    pub ir: u32,
    /// FSM state.
    pub state: State,
    /// Registered bus request lines.
    pub bus: BusMaster,
    /// Load staging registers.
    pub staging: LoadStaging,
}

impl CoreState {
    /// Returns the reset state with the PC at `start_pc`.
    pub fn reset(start_pc: u32) -> Self {
        Self {
            pc: start_pc,
            ..Self::default()
        }
    }

    /// Returns the outstanding bus transaction, if any.
    pub fn outstanding(&self) -> Option<Outstanding> {
        if !self.bus.is_active() {
            return None;
        }
        self.state.access().map(|access| Outstanding {
            access,
            addr: self.bus.addr,
        })
    }
}

/// Record of one completed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retired {
    /// Address of the instruction.
    pub pc: u32,
    /// Raw instruction word.
    pub raw: u32,
    /// Opcode class, `None` if unrecognized.
    pub class: Option<Opcode>,
    /// PC of the next instruction.
    pub next_pc: u32,
    /// Register write committed with the instruction, if any.
    pub write: Option<RegWrite>,
    /// A jump was made or a branch was taken.
    pub taken: bool,
    /// Condition reported by the instruction.
    pub condition: Option<Condition>,
}

impl Retired {
    /// Returns `true` if the instruction transferred control to itself.
    ///
    /// Bare-metal programs end in `j .`; the simulator treats this as a halt.
    pub fn is_self_loop(&self) -> bool {
        self.taken && self.next_pc == self.pc
    }
}

/// Outputs of one controller cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// State to register at the clock edge.
    pub next: CoreState,
    /// Register file write port for this cycle.
    pub write: WritePort,
    /// Instruction completed this cycle, if any.
    pub retired: Option<Retired>,
}

/// Computes one controller cycle.
///
/// # Arguments
///
/// * `s`    - The state registered at the last clock edge.
/// * `regs` - The register file (reads see last-edge values).
/// * `resp` - The bus target's response to `s.bus` this cycle.
///
/// # Returns
///
/// The next state and the side effects to commit atomically.
pub fn step(s: &CoreState, regs: &RegisterFile, resp: BusResponse) -> Step {
    let mut next = *s;
    let mut write = WritePort::default();
    let mut retired = None;

    match s.state {
        State::Fetch => {
            if !s.bus.is_active() {
                next.bus = BusMaster::fetch(s.pc);
            } else if resp.ack {
                next.ir = resp.data;
                next.bus = BusMaster::idle();
                next.state = State::Decode;
            }
        }
        State::Decode => {
            let d = decode(s.ir);
            match execute(&d, s.pc, regs) {
                Execution::Retire {
                    write: port,
                    next_pc,
                    taken,
                    condition,
                } => {
                    write = port;
                    next.pc = next_pc;
                    next.state = State::Fetch;
                    retired = Some(Retired {
                        pc: s.pc,
                        raw: s.ir,
                        class: d.class,
                        next_pc,
                        write: port.as_write(),
                        taken,
                        condition,
                    });
                }
                Execution::Load { request, staging } => {
                    next.bus = request;
                    next.staging = staging;
                    next.state = State::Load;
                }
                Execution::Store { request } => {
                    next.bus = request;
                    next.state = State::Store;
                }
            }
        }
        State::Load | State::Store => {
            if resp.ack {
                if s.state == State::Load {
                    let st = s.staging;
                    let value = Lsu::extract_load(st.width, st.signed, st.offset, resp.data);
                    write = WritePort::write(st.rd, value);
                }
                let next_pc = Bru::fallthrough(s.pc);
                next.pc = next_pc;
                next.bus = BusMaster::idle();
                next.state = State::Fetch;
                retired = Some(Retired {
                    pc: s.pc,
                    raw: s.ir,
                    class: Some(if s.state == State::Load {
                        Opcode::Load
                    } else {
                        Opcode::Store
                    }),
                    next_pc,
                    write: write.as_write(),
                    taken: false,
                    condition: None,
                });
            }
        }
    }

    Step {
        next,
        write,
        retired,
    }
}
