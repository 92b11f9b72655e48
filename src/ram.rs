//! Address mapping for the DS1307 battery-backed RAM.
//!
//! The device exposes 56 bytes of general purpose RAM at register addresses
//! `0x08..=0x3F`. Every offset handed to the driver is folded into that window
//! with modular wraparound, so no offset can ever reach the timekeeping or
//! control registers below it.
//!
//! The register pointer auto-increments during bursts and wraps from `0x3F` to
//! `0x00`. Bursts are therefore split with [`segments`] so each bus transfer
//! stays inside the window.

use core::ops::Range;

/// First RAM register address.
pub const RAM_START: u8 = 0x08;
/// Last RAM register address.
pub const RAM_END: u8 = 0x3F;
/// Number of bytes in the RAM window.
pub const RAM_SIZE: usize = (RAM_END - RAM_START) as usize + 1;

/// Maps an arbitrary offset to a register address inside the RAM window.
pub fn map_offset(offset: usize) -> u8 {
    // offset % RAM_SIZE < 56, so the narrowing cannot truncate
    RAM_START + (offset % RAM_SIZE) as u8
}

/// Splits a burst of `len` bytes starting at `offset` into transfers that do
/// not cross the end of the window.
///
/// Each item is the mapped start address and the range of payload indices
/// transferred there. `len` is expected to be at most [`RAM_SIZE`]; longer
/// bursts would overwrite their own start.
pub fn segments(offset: usize, len: usize) -> Segments {
    Segments {
        position: offset % RAM_SIZE,
        done: 0,
        len,
    }
}

/// Iterator returned by [`segments`].
#[derive(Debug, Clone)]
pub struct Segments {
    position: usize,
    done: usize,
    len: usize,
}

impl Iterator for Segments {
    type Item = (u8, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done >= self.len {
            return None;
        }
        let room = RAM_SIZE - self.position;
        let count = room.min(self.len - self.done);
        let address = map_offset(self.position);
        let range = self.done..self.done + count;
        self.done += count;
        self.position = (self.position + count) % RAM_SIZE;
        Some((address, range))
    }
}
