//! Word-addressed system memory.
//!
//! This module implements the bus target that backs the core. It provides:
//! 1. **Storage:** A `Vec<u32>` of words mapped at a base address; `(addr - base) >> 2`
//!    selects the word.
//! 2. **Timing:** A fixed number of wait states before each acknowledge.
//! 3. **Byte Lanes:** Writes update only the lanes enabled by the byte select.
//!
//! Requests outside the mapped range are never acknowledged, so a stray access
//! stalls the core until the simulator's cycle budget runs out.

use tracing::warn;

use crate::common::constants::{WORD_BYTES, WORD_SHIFT};
use crate::common::error::{SimError, SimResult};
use crate::soc::bus::{BusMaster, BusResponse, BusTarget};

/// Number of byte lanes on the data bus.
const LANES: u32 = WORD_BYTES;

/// Bits per byte lane.
const LANE_BITS: u32 = 8;

/// Word-addressed RAM answering the request/acknowledge bus.
#[derive(Clone, Debug)]
pub struct Memory {
    base: u32,
    words: Vec<u32>,
    wait_states: u32,
    waited: u32,
    acked: bool,
    reported_unmapped: bool,
}

impl Memory {
    /// Creates a zero-filled memory.
    ///
    /// # Arguments
    ///
    /// * `base`        - Byte address of the first word.
    /// * `size_bytes`  - Capacity in bytes, rounded up to whole words.
    /// * `wait_states` - Cycles the memory holds off acknowledge for each request.
    pub fn new(base: u32, size_bytes: usize, wait_states: u32) -> Self {
        let words = size_bytes.div_ceil(WORD_BYTES as usize);
        Self {
            base,
            words: vec![0; words],
            wait_states,
            waited: 0,
            acked: false,
            reported_unmapped: false,
        }
    }

    /// Returns the base address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Returns the capacity in bytes.
    pub const fn size_bytes(&self) -> usize {
        self.words.len() * WORD_BYTES as usize
    }

    /// Returns the configured number of wait states.
    pub const fn wait_states(&self) -> u32 {
        self.wait_states
    }

    /// Returns `true` if `addr` falls inside the mapped range.
    pub fn contains(&self, addr: u32) -> bool {
        self.word_index(addr).is_some()
    }

    fn word_index(&self, addr: u32) -> Option<usize> {
        let offset = addr.checked_sub(self.base)?;
        let idx = (offset >> WORD_SHIFT) as usize;
        (idx < self.words.len()).then_some(idx)
    }

    /// Reads the word containing `addr`, bypassing the bus.
    pub fn peek(&self, addr: u32) -> Option<u32> {
        self.word_index(addr).map(|idx| self.words[idx])
    }

    /// Writes the word containing `addr`, bypassing the bus.
    ///
    /// # Returns
    ///
    /// `false` if `addr` is unmapped.
    pub fn poke(&mut self, addr: u32, value: u32) -> bool {
        match self.word_index(addr) {
            Some(idx) => {
                self.words[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Checks that `len` bytes starting at `addr` lie inside memory.
    ///
    /// # Returns
    ///
    /// The byte offset of `addr` from the memory base.
    ///
    /// # Errors
    ///
    /// [`SimError::ImageOutOfRange`] if any byte of the region is unmapped.
    pub fn check_range(&self, addr: u32, len: usize) -> SimResult<usize> {
        let out_of_range = || SimError::ImageOutOfRange {
            addr,
            len,
            base: self.base,
            size: self.size_bytes(),
        };
        let start = addr.checked_sub(self.base).ok_or_else(out_of_range)? as usize;
        let end = start.checked_add(len).ok_or_else(out_of_range)?;
        if end > self.size_bytes() {
            return Err(out_of_range());
        }
        Ok(start)
    }

    /// Copies a byte image into memory, little-endian.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address of the first byte.
    /// * `data` - Bytes to place.
    ///
    /// # Errors
    ///
    /// [`SimError::ImageOutOfRange`] if any byte falls outside memory; nothing
    /// is written in that case.
    pub fn load(&mut self, addr: u32, data: &[u8]) -> SimResult<()> {
        let start = self.check_range(addr, data.len())?;

        for (i, byte) in data.iter().enumerate() {
            let pos = start + i;
            let lane = (pos % WORD_BYTES as usize) as u32 * LANE_BITS;
            let word = &mut self.words[pos / WORD_BYTES as usize];
            *word = (*word & !(0xFF << lane)) | (u32::from(*byte) << lane);
        }
        Ok(())
    }

    /// Returns the memory contents as bytes, little-endian.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    /// Merges `data` into `word` on the lanes enabled by `sel`.
    const fn merge_lanes(word: u32, data: u32, sel: u8) -> u32 {
        let mut mask = 0u32;
        let mut lane = 0;
        while lane < LANES {
            if sel & (1 << lane) != 0 {
                mask |= 0xFF << (lane * LANE_BITS);
            }
            lane += 1;
        }
        (word & !mask) | (data & mask)
    }
}

impl BusTarget for Memory {
    fn respond(&mut self, req: &BusMaster) -> BusResponse {
        if !req.is_active() {
            self.waited = 0;
            self.acked = false;
            self.reported_unmapped = false;
            return BusResponse::wait();
        }

        if self.acked {
            return BusResponse::wait();
        }

        let Some(idx) = self.word_index(req.addr) else {
            if !self.reported_unmapped {
                warn!(
                    "bus {} at unmapped address {:#010x} will never be acknowledged",
                    if req.we { "write" } else { "read" },
                    req.addr
                );
                self.reported_unmapped = true;
            }
            return BusResponse::wait();
        };

        if self.waited < self.wait_states {
            self.waited += 1;
            return BusResponse::wait();
        }

        self.acked = true;
        if req.we {
            self.words[idx] = Self::merge_lanes(self.words[idx], req.data, req.sel);
            BusResponse::ack(0)
        } else {
            BusResponse::ack(self.words[idx])
        }
    }
}
