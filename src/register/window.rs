//! Disjoint 4-bit windows within a shared register image.

use super::coil::COIL_SEQUENCE;

/// Bits per motor window.
pub const WINDOW_BITS: u32 = 4;

const WINDOW_MASK: u64 = 0b1111;

/// A motor's slice of the register image.
///
/// Window `n` covers bits `4n..4n+4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitWindow {
    index: u32,
}

impl BitWindow {
    /// Window for the motor attached in position `index`.
    ///
    /// Only [`SharedRegister`](super::SharedRegister) hands windows out, after
    /// checking that they fit its width.
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        Self { index }
    }

    /// Attachment index.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Lowest bit of the window.
    #[inline]
    pub fn bit_start(&self) -> u32 {
        WINDOW_BITS * self.index
    }

    /// Mask selecting this window's bits.
    #[inline]
    pub fn mask(&self) -> u64 {
        WINDOW_MASK << self.bit_start()
    }

    /// Replace this window's bits with `pattern`, leaving every other bit as is.
    #[inline]
    pub fn merge(&self, image: u64, pattern: u8) -> u64 {
        (image & !self.mask()) | (((pattern as u64) & WINDOW_MASK) << self.bit_start())
    }

    /// Read this window's pattern back out of an image.
    #[inline]
    pub fn extract(&self, image: u64) -> u8 {
        ((image >> self.bit_start()) & WINDOW_MASK) as u8
    }

    /// Whether the window lies entirely inside a register of `bit_width` bits.
    #[inline]
    pub fn fits(&self, bit_width: u32) -> bool {
        self.bit_start() + WINDOW_BITS <= bit_width
    }
}

/// Index of `pattern` in the coil table, if it is one of its entries.
pub fn sequence_index(pattern: u8) -> Option<u8> {
    COIL_SEQUENCE
        .iter()
        .position(|&p| p == pattern)
        .map(|i| i as u8)
}
