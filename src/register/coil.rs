//! Coil excitation sequence.
//!
//! Eight half-step patterns for a unipolar 4-coil stepper. Walking the table
//! forward turns the shaft one way, walking it backward turns it the other.

use crate::motion::Direction;

/// Number of entries in one excitation cycle.
pub const SEQUENCE_LEN: usize = 8;

/// Half-step excitation patterns, one bit per coil.
pub const COIL_SEQUENCE: [u8; SEQUENCE_LEN] = [
    0b0001, 0b0011, 0b0010, 0b0110, 0b0100, 0b1100, 0b1000, 0b1001,
];

/// Position within the coil sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilSequence {
    position: u8,
}

impl CoilSequence {
    /// Start at the first table entry.
    #[inline]
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// Current index into [`COIL_SEQUENCE`], always in `0..8`.
    #[inline]
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Pattern for the current position.
    #[inline]
    pub fn pattern(&self) -> u8 {
        COIL_SEQUENCE[self.position as usize]
    }

    /// Move one entry forward or backward, wrapping around the table.
    ///
    /// Returns the pattern for the new position.
    pub fn advance(&mut self, direction: Direction) -> u8 {
        let len = SEQUENCE_LEN as i8;
        let next = (self.position as i8 + direction.sign() as i8).rem_euclid(len);
        self.position = next as u8;
        self.pattern()
    }
}
