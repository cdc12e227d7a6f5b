//! Load/Store Unit (LSU).
//!
//! Maps sub-word transfers onto the 32-bit data bus. The low two address bits
//! select the byte lane; the bus always carries the full word at the
//! word-aligned address together with a 4-bit byte select.
//! 1. **Stores:** shift the source value into its lane and drive the matching select.
//! 2. **Loads:** extract the lane from the returned word and sign- or zero-extend it.
//!
//! Accesses that straddle a word (a halfword at offset 3) keep only the lanes
//! that fit in the addressed word; misalignment is not trapped.

use crate::common::constants::{BYTE_OFFSET_MASK, SEL_ALL};
use crate::common::data::MemWidth;

/// Byte-select pattern for a single byte lane.
const SEL_BYTE: u8 = 0b0001;

/// Byte-select pattern for a halfword (two lanes).
const SEL_HALF: u8 = 0b0011;

/// Mask selecting the low byte of a value.
const BYTE_MASK: u32 = 0xFF;

/// Mask selecting the low halfword of a value.
const HALF_MASK: u32 = 0xFFFF;

/// Bits per byte lane.
const LANE_BITS: u32 = 8;

/// Load/Store Unit for bus data alignment.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Returns the byte offset of `addr` within its word.
    pub const fn byte_offset(addr: u32) -> u32 {
        addr & BYTE_OFFSET_MASK
    }

    /// Computes the 4-bit byte select for a transfer.
    ///
    /// # Arguments
    ///
    /// * `width` - Transfer width.
    /// * `addr`  - Byte address of the access.
    pub const fn byte_select(width: MemWidth, addr: u32) -> u8 {
        let lanes = match width {
            MemWidth::Byte => SEL_BYTE,
            MemWidth::Half => SEL_HALF,
            MemWidth::Word => return SEL_ALL,
        };
        (lanes << Self::byte_offset(addr)) & SEL_ALL
    }

    /// Positions store data in its byte lane.
    ///
    /// # Arguments
    ///
    /// * `width` - Store width.
    /// * `addr`  - Byte address of the store.
    /// * `value` - Value of the source register.
    ///
    /// # Returns
    ///
    /// The bus write-data word. Bytes outside the selected lanes are zero.
    pub const fn align_store(width: MemWidth, addr: u32, value: u32) -> u32 {
        let shift = Self::byte_offset(addr) * LANE_BITS;
        match width {
            MemWidth::Byte => (value & BYTE_MASK) << shift,
            MemWidth::Half => (value & HALF_MASK) << shift,
            MemWidth::Word => value,
        }
    }

    /// Extracts load data from a bus word.
    ///
    /// # Arguments
    ///
    /// * `width`  - Load width.
    /// * `signed` - Sign-extend (`LB`, `LH`) rather than zero-extend (`LBU`, `LHU`).
    /// * `offset` - Byte offset latched when the load was issued.
    /// * `word`   - Read data returned by the bus.
    pub const fn extract_load(width: MemWidth, signed: bool, offset: u32, word: u32) -> u32 {
        let lane = word >> ((offset & BYTE_OFFSET_MASK) * LANE_BITS);
        match (width, signed) {
            (MemWidth::Byte, true) => lane as u8 as i8 as i32 as u32,
            (MemWidth::Byte, false) => lane & BYTE_MASK,
            (MemWidth::Half, true) => lane as u16 as i16 as i32 as u32,
            (MemWidth::Half, false) => lane & HALF_MASK,
            (MemWidth::Word, _) => word,
        }
    }
}
