//! Controller FSM Tests.
//!
//! Drives `step` directly with hand-made bus responses, checking each
//! state transition, the registered bus lines and the write port.

use pretty_assertions::assert_eq;
use rv32mc_core::Condition;
use rv32mc_core::common::data::{AccessType, MemWidth};
use rv32mc_core::common::reg::{RegWrite, RegisterFile, WritePort};
use rv32mc_core::core::control::{CoreState, State, step};
use rv32mc_core::core::execute::LoadStaging;
use rv32mc_core::isa::instruction::Opcode;
use rv32mc_core::soc::bus::{BusMaster, BusResponse, Outstanding};

use crate::common::builder::instruction::inst;

/// State in DECODE holding `ir` at `pc`.
fn decoding(pc: u32, ir: u32) -> CoreState {
    CoreState {
        pc,
        ir,
        state: State::Decode,
        ..CoreState::reset(pc)
    }
}

#[test]
fn reset_is_fetch_with_idle_bus() {
    let s = CoreState::reset(0x80);
    assert_eq!(s.state, State::Fetch);
    assert_eq!(s.pc, 0x80);
    assert!(!s.bus.is_active());
    assert_eq!(s.outstanding(), None);
}

#[test]
fn fetch_drives_request_from_idle() {
    let s = CoreState::reset(0x80);
    let out = step(&s, &RegisterFile::new(), BusResponse::wait());

    assert_eq!(out.next.state, State::Fetch);
    assert_eq!(out.next.bus, BusMaster::fetch(0x80));
    assert_eq!(out.next.bus.sel, 0b1111);
    assert_eq!(out.write, WritePort::default());
    assert_eq!(out.retired, None);
    assert_eq!(
        out.next.outstanding(),
        Some(Outstanding {
            access: AccessType::Fetch,
            addr: 0x80
        })
    );
}

#[test]
fn fetch_holds_request_until_ack() {
    let mut s = CoreState::reset(0x80);
    s.bus = BusMaster::fetch(0x80);

    let out = step(&s, &RegisterFile::new(), BusResponse::wait());
    assert_eq!(out.next, s, "nothing changes while waiting");

    let word = inst().addi(1, 0, 5).build();
    let out = step(&s, &RegisterFile::new(), BusResponse::ack(word));
    assert_eq!(out.next.state, State::Decode);
    assert_eq!(out.next.ir, word);
    assert_eq!(out.next.bus, BusMaster::idle());
    assert_eq!(out.next.pc, 0x80, "PC moves only when an instruction completes");
}

#[test]
fn ack_without_request_is_ignored() {
    let s = CoreState::reset(0);
    let out = step(&s, &RegisterFile::new(), BusResponse::ack(0xFFFF_FFFF));
    assert_eq!(out.next.ir, 0);
    assert_eq!(out.next.bus, BusMaster::fetch(0));
}

#[test]
fn decode_retires_alu_instruction() {
    let mut regs = RegisterFile::new();
    regs.poke(2, 40);
    let s = decoding(0x100, inst().addi(1, 2, 2).build());

    let out = step(&s, &regs, BusResponse::wait());
    assert_eq!(out.write, WritePort::write(1, 42));
    assert_eq!(out.next.state, State::Fetch);
    assert_eq!(out.next.pc, 0x104);
    assert!(!out.next.bus.is_active());

    let r = out.retired.unwrap();
    assert_eq!(r.pc, 0x100);
    assert_eq!(r.next_pc, 0x104);
    assert_eq!(r.class, Some(Opcode::OpImm));
    assert_eq!(r.write, Some(RegWrite { index: 1, value: 42 }));
    assert!(!r.taken);
    assert!(!r.is_self_loop());
}

#[test]
fn decode_issues_load_and_latches_staging() {
    let mut regs = RegisterFile::new();
    regs.poke(2, 0x200);
    let s = decoding(0x100, inst().lh(7, 2, 3).build());

    let out = step(&s, &regs, BusResponse::wait());
    assert_eq!(out.next.state, State::Load);
    assert_eq!(out.next.bus, BusMaster::read(0x203, 0b1000));
    assert_eq!(
        out.next.staging,
        LoadStaging {
            rd: 7,
            signed: true,
            width: MemWidth::Half,
            offset: 3
        }
    );
    assert_eq!(out.write, WritePort::default());
    assert_eq!(out.retired, None);
    assert_eq!(out.next.pc, 0x100);
}

#[test]
fn load_waits_then_writes_extracted_lane() {
    let s = CoreState {
        pc: 0x100,
        ir: inst().lb(7, 0, 0x201).build(),
        state: State::Load,
        bus: BusMaster::read(0x201, 0b0010),
        staging: LoadStaging {
            rd: 7,
            signed: true,
            width: MemWidth::Byte,
            offset: 1,
        },
    };
    let regs = RegisterFile::new();

    let out = step(&s, &regs, BusResponse::wait());
    assert_eq!(out.next, s);
    assert_eq!(out.write, WritePort::default());

    let out = step(&s, &regs, BusResponse::ack(0x0000_8000));
    assert_eq!(out.write, WritePort::write(7, 0xFFFF_FF80));
    assert_eq!(out.next.state, State::Fetch);
    assert_eq!(out.next.pc, 0x104);
    assert!(!out.next.bus.is_active());
    assert_eq!(out.retired.unwrap().class, Some(Opcode::Load));
}

#[test]
fn store_issues_write_and_completes_on_ack() {
    let mut regs = RegisterFile::new();
    regs.poke(1, 0x300);
    regs.poke(2, 0x1234_56AB);
    let s = decoding(0x40, inst().sb(1, 2, 2).build());

    let out = step(&s, &regs, BusResponse::wait());
    assert_eq!(out.next.state, State::Store);
    assert_eq!(out.next.bus, BusMaster::write(0x302, 0x00AB_0000, 0b0100));
    assert_eq!(
        out.next.outstanding(),
        Some(Outstanding {
            access: AccessType::Write,
            addr: 0x302
        })
    );

    let waiting = out.next;
    let out = step(&waiting, &regs, BusResponse::ack(0));
    assert_eq!(out.write, WritePort::default());
    assert_eq!(out.next.state, State::Fetch);
    assert_eq!(out.next.pc, 0x44);
    let r = out.retired.unwrap();
    assert_eq!(r.class, Some(Opcode::Store));
    assert_eq!(r.write, None);
}

#[test]
fn taken_branch_redirects_pc() {
    let s = decoding(0x100, inst().beq(0, 0, 8).build());
    let out = step(&s, &RegisterFile::new(), BusResponse::wait());
    assert_eq!(out.next.pc, 0x108);
    assert_eq!(out.write, WritePort::default());
    assert!(out.retired.unwrap().taken);
}

#[test]
fn self_loop_is_flagged() {
    let s = decoding(0x100, inst().halt().build());
    let out = step(&s, &RegisterFile::new(), BusResponse::wait());
    let r = out.retired.unwrap();
    assert!(r.is_self_loop());
    assert_eq!(out.write, WritePort::write(0, 0x104));
}

#[test]
fn unrecognized_instruction_is_a_no_op() {
    let s = decoding(0x100, 0xFFFF_FFFF);
    let out = step(&s, &RegisterFile::new(), BusResponse::wait());
    assert_eq!(out.write, WritePort::default());
    assert_eq!(out.next.pc, 0x104);
    let r = out.retired.unwrap();
    assert_eq!(r.class, None);
    assert!(matches!(r.condition, Some(Condition::UnrecognizedOpcode { .. })));
}

#[test]
fn state_names_and_accesses() {
    assert_eq!(State::Fetch.to_string(), "FETCH");
    assert_eq!(State::Store.to_string(), "STORE");
    assert_eq!(State::Fetch.access(), Some(AccessType::Fetch));
    assert_eq!(State::Decode.access(), None);
    assert_eq!(State::Load.access(), Some(AccessType::Read));
    assert_eq!(State::Store.access(), Some(AccessType::Write));
}
