//! Memory Target Tests.

use pretty_assertions::assert_eq;
use rv32mc_core::SimError;
use rv32mc_core::soc::bus::{BusMaster, BusResponse, BusTarget};
use rv32mc_core::soc::memory::Memory;

#[test]
fn geometry() {
    let mem = Memory::new(0x8000_0000, 0x100, 3);
    assert_eq!(mem.base(), 0x8000_0000);
    assert_eq!(mem.size_bytes(), 0x100);
    assert_eq!(mem.wait_states(), 3);
    assert!(mem.contains(0x8000_0000));
    assert!(mem.contains(0x8000_00FF));
    assert!(!mem.contains(0x8000_0100));
    assert!(!mem.contains(0x7FFF_FFFC));
}

#[test]
fn size_rounds_up_to_words() {
    assert_eq!(Memory::new(0, 5, 0).size_bytes(), 8);
}

#[test]
fn peek_and_poke() {
    let mut mem = Memory::new(0x100, 0x10, 0);
    assert!(mem.poke(0x104, 0x1234_5678));
    assert_eq!(mem.peek(0x104), Some(0x1234_5678));
    assert_eq!(mem.peek(0x106), Some(0x1234_5678), "addresses select whole words");
    assert!(!mem.poke(0x110, 1));
    assert_eq!(mem.peek(0xFC), None);
}

#[test]
fn read_acks_with_word() {
    let mut mem = Memory::new(0, 0x10, 0);
    assert!(mem.poke(8, 0xCAFE_F00D));
    assert_eq!(mem.respond(&BusMaster::read(8, 0b1111)), BusResponse::ack(0xCAFE_F00D));
}

#[test]
fn idle_bus_is_never_acked() {
    let mut mem = Memory::new(0, 0x10, 0);
    for _ in 0..3 {
        assert_eq!(mem.respond(&BusMaster::idle()), BusResponse::wait());
    }
}

#[test]
fn ack_once_per_transaction() {
    let mut mem = Memory::new(0, 0x10, 0);
    let req = BusMaster::read(0, 0b1111);
    assert!(mem.respond(&req).ack);
    assert!(!mem.respond(&req).ack, "a held request is not acknowledged twice");
    let _ = mem.respond(&BusMaster::idle());
    assert!(mem.respond(&req).ack);
}

#[test]
fn wait_states_delay_ack() {
    let mut mem = Memory::new(0, 0x10, 2);
    let req = BusMaster::read(0, 0b1111);
    assert!(!mem.respond(&req).ack);
    assert!(!mem.respond(&req).ack);
    assert!(mem.respond(&req).ack);

    // Counting restarts with the next transaction.
    let _ = mem.respond(&BusMaster::idle());
    assert!(!mem.respond(&req).ack);
}

#[test]
fn write_merges_selected_lanes() {
    let mut mem = Memory::new(0, 0x10, 0);
    assert!(mem.poke(4, 0x1122_3344));

    assert!(mem.respond(&BusMaster::write(5, 0xFFFF_AAFF, 0b0010)).ack);
    assert_eq!(mem.peek(4), Some(0x1122_AA44));

    let _ = mem.respond(&BusMaster::idle());
    assert!(mem.respond(&BusMaster::write(6, 0xBEEF_0000, 0b1100)).ack);
    assert_eq!(mem.peek(4), Some(0xBEEF_AA44));

    let _ = mem.respond(&BusMaster::idle());
    assert!(mem.respond(&BusMaster::write(4, 0xDEAD_BEEF, 0b0000)).ack);
    assert_eq!(mem.peek(4), Some(0xBEEF_AA44), "no lanes selected leaves the word alone");
}

#[test]
fn unmapped_request_is_never_acked() {
    let mut mem = Memory::new(0x1000, 0x10, 0);
    let req = BusMaster::read(0x10, 0b1111);
    for _ in 0..100 {
        assert_eq!(mem.respond(&req), BusResponse::wait());
    }
}

#[test]
fn load_is_little_endian() {
    let mut mem = Memory::new(0x100, 0x10, 0);
    mem.load(0x101, &[0xAA, 0xBB, 0xCC, 0xDD]).unwrap();
    assert_eq!(mem.peek(0x100), Some(0xCCBB_AA00));
    assert_eq!(mem.peek(0x104), Some(0x0000_00DD));
    assert_eq!(&mem.to_bytes()[..6], &[0x00, 0xAA, 0xBB, 0xCC, 0xDD, 0x00]);
}

#[test]
fn load_out_of_range() {
    let mut mem = Memory::new(0x100, 0x10, 0);
    let err = mem.load(0x10E, &[1, 2, 3]).unwrap_err();
    assert!(matches!(
        err,
        SimError::ImageOutOfRange {
            addr: 0x10E,
            len: 3,
            base: 0x100,
            size: 0x10
        }
    ));
    assert!(mem.load(0xFF, &[1]).is_err(), "below base");
    assert_eq!(mem.peek(0x10C), Some(0), "nothing written on failure");
}

#[test]
fn check_range_bounds() {
    let mem = Memory::new(0x100, 0x10, 0);
    assert_eq!(mem.check_range(0x100, 0x10).unwrap(), 0);
    assert_eq!(mem.check_range(0x10C, 4).unwrap(), 0xC);
    assert!(mem.check_range(0x10C, 5).is_err());
    assert!(mem.check_range(0xFC, 4).is_err());
    assert!(mem.check_range(0x100, usize::MAX).is_err());
}
