//! Unit types for physical quantities.
//!
//! Provides type-safe representations of angles and motor steps to prevent
//! degree/radian confusion at compile time.

use core::ops::{Add, Sub};

use serde::Deserialize;

/// Angular position or displacement in degrees.
///
/// Used for the motor API. Internally converted to [`Steps`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to radians.
    #[inline]
    pub fn to_radians(self) -> Radians {
        Radians(self.0 * core::f64::consts::PI / 180.0)
    }

    /// Absolute magnitude.
    #[inline]
    pub fn abs(self) -> Self {
        Self(if self.0 < 0.0 { -self.0 } else { self.0 })
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Angular position in radians.
///
/// Target geometry is expressed in radians around the shared center.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Radians(pub f64);

impl Radians {
    /// Create a new Radians value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to degrees.
    #[inline]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0 * 180.0 / core::f64::consts::PI)
    }
}

impl Sub for Radians {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Count of single coil-sequence steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub u32);

impl Steps {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whole steps covered by an angular distance, rounded toward zero.
    ///
    /// Returns `None` if the distance is not finite or needs more than
    /// `u32::MAX` steps.
    #[inline]
    pub fn from_degrees(degrees: Degrees, steps_per_degree: f64) -> Option<Self> {
        let steps = libm::floor(steps_per_degree * degrees.abs().0);
        if steps.is_finite() && steps <= u32::MAX as f64 {
            Some(Self(steps as u32))
        } else {
            None
        }
    }

    /// Angular distance covered by this many steps.
    #[inline]
    pub fn to_degrees(self, steps_per_degree: f64) -> Degrees {
        Degrees(self.0 as f64 / steps_per_degree)
    }
}
