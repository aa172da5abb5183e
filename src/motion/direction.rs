//! Rotation direction.

use crate::config::units::Degrees;

/// Direction of motor motion.
///
/// Clockwise walks the coil table forward and increases the angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (positive delta).
    Clockwise,
    /// Counter-clockwise (negative delta).
    CounterClockwise,
}

impl Direction {
    /// Get direction from a signed angular delta.
    ///
    /// Zero maps to `Clockwise`; a zero delta plans zero steps either way.
    #[inline]
    pub fn from_delta(delta: Degrees) -> Self {
        if delta.0 >= 0.0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}
