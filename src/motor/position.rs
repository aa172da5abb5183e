//! Angle tracking for stepper motors.
//!
//! Provides the believed absolute shaft angle, wrapped into `[0, 360)`.

use crate::config::units::Degrees;
use crate::motion::{normalize_degrees, shortest_delta, Direction};

/// Motor angle tracker.
///
/// Updated once per step with `±1 / steps_per_degree` degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position {
    /// Believed shaft angle in `[0, 360)`.
    degrees: f64,
    /// Steps per degree for conversions
    steps_per_degree: f64,
}

impl Position {
    /// Create a new tracker at 0 degrees.
    #[inline]
    pub fn new(steps_per_degree: f64) -> Self {
        Self {
            degrees: 0.0,
            steps_per_degree,
        }
    }

    /// Create a tracker at a specific angle.
    #[inline]
    pub fn at(degrees: Degrees, steps_per_degree: f64) -> Self {
        Self {
            degrees: normalize_degrees(degrees).0,
            steps_per_degree,
        }
    }

    /// Get current angle in degrees.
    #[inline]
    pub fn degrees(&self) -> Degrees {
        Degrees(self.degrees)
    }

    /// Get steps per degree conversion factor.
    #[inline]
    pub fn steps_per_degree(&self) -> f64 {
        self.steps_per_degree
    }

    /// Account for one step in `direction`.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        let delta = direction.sign() as f64 / self.steps_per_degree;
        self.degrees = normalize_degrees(Degrees(self.degrees + delta)).0;
    }

    /// Set the current angle.
    #[inline]
    pub fn set_degrees(&mut self, degrees: Degrees) {
        self.degrees = normalize_degrees(degrees).0;
    }

    /// Set current angle as the new origin.
    #[inline]
    pub fn set_origin(&mut self) {
        self.degrees = 0.0;
    }

    /// Shortest signed delta from the current angle to `target`.
    #[inline]
    pub fn shortest_delta_to(&self, target: Degrees) -> Degrees {
        shortest_delta(self.degrees(), target)
    }
}
