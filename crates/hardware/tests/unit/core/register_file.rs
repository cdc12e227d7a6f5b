//! Register File Tests.
//!
//! The write port commits on the clock edge, `x0` never reads back nonzero,
//! and a read in the same cycle as a write sees the old value.

use pretty_assertions::assert_eq;
use rv32mc_core::common::reg::{RegWrite, RegisterFile, WritePort};

#[test]
fn reset_state_is_zero() {
    let rf = RegisterFile::new();
    assert_eq!(rf.snapshot(), [0; 32]);
    assert_eq!(rf.last_write(), None);
}

#[test]
fn write_visible_after_clock() {
    let mut rf = RegisterFile::new();
    let port = WritePort::write(5, 0xDEAD_BEEF);

    assert_eq!(rf.read(5), 0, "no same-cycle bypass");
    rf.clock(port);
    assert_eq!(rf.read(5), 0xDEAD_BEEF);
    assert_eq!(
        rf.last_write(),
        Some(RegWrite {
            index: 5,
            value: 0xDEAD_BEEF
        })
    );
}

#[test]
fn x0_is_hardwired() {
    let mut rf = RegisterFile::new();
    rf.clock(WritePort::write(0, 42));
    assert_eq!(rf.read(0), 0);
    assert_eq!(rf.last_write(), Some(RegWrite { index: 0, value: 42 }));

    rf.poke(0, 7);
    assert_eq!(rf.read(0), 0);
}

#[test]
fn disabled_port_is_ignored() {
    let mut rf = RegisterFile::new();
    rf.clock(WritePort::write(3, 1));
    rf.clock(WritePort {
        enable: false,
        index: 3,
        value: 99,
    });
    assert_eq!(rf.read(3), 1);
    assert_eq!(rf.last_write(), Some(RegWrite { index: 3, value: 1 }));
}

#[test]
fn poke_bypasses_write_port() {
    let mut rf = RegisterFile::new();
    rf.poke(31, 0xFFFF_FFFF);
    assert_eq!(rf.read(31), 0xFFFF_FFFF);
    assert_eq!(rf.last_write(), None);
}

#[test]
fn as_write_reflects_enable() {
    assert_eq!(WritePort::default().as_write(), None);
    assert_eq!(
        WritePort::write(1, 2).as_write(),
        Some(RegWrite { index: 1, value: 2 })
    );
}

#[test]
fn display_uses_abi_names() {
    let mut rf = RegisterFile::new();
    rf.poke(10, 0x2A);
    let dump = rf.to_string();
    assert!(dump.contains("x10   a0 = 0x0000002a"), "{dump}");
    assert_eq!(dump.lines().count(), 8);
}
