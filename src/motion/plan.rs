//! Step planning and shortest-path angle math.

use crate::config::units::{Degrees, Steps};
use crate::error::{MotorError, Result};

use super::Direction;

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(angle: Degrees) -> Degrees {
    let mut wrapped = angle.0 % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // Tiny negative inputs round up to exactly 360.0.
    if wrapped >= 360.0 {
        wrapped = 0.0;
    }
    Degrees(wrapped)
}

/// Signed delta that takes the shorter arc from `current` to `target`.
///
/// Computes `((target - current + 540) mod 360) - 180`. The result lies in
/// `(-180, 180]`: a half-turn is always taken clockwise.
pub fn shortest_delta(current: Degrees, target: Degrees) -> Degrees {
    let raw = normalize_degrees(target - current + Degrees(540.0)).0 - 180.0;
    if raw <= -180.0 {
        Degrees(raw + 360.0)
    } else {
        Degrees(raw)
    }
}

/// Step count and direction for a relative move.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationPlan {
    /// Requested angular delta.
    pub delta: Degrees,
    /// Direction every step is taken in.
    pub direction: Direction,
    /// Number of single steps, `floor(steps_per_degree * |delta|)`.
    pub steps: Steps,
}

impl RotationPlan {
    /// Plan a relative move of `delta` degrees.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::OutOfRange` if `delta` is not finite or needs more
    /// than `u32::MAX` steps.
    pub fn relative(delta: Degrees, steps_per_degree: f64) -> Result<Self> {
        let steps = Steps::from_degrees(delta, steps_per_degree)
            .ok_or(MotorError::OutOfRange { delta: delta.0 })?;
        Ok(Self {
            delta,
            direction: Direction::from_delta(delta),
            steps,
        })
    }

    /// A plan that takes no steps.
    pub fn zero() -> Self {
        Self {
            delta: Degrees(0.0),
            direction: Direction::Clockwise,
            steps: Steps(0),
        }
    }

    /// Whether the plan takes no steps.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.steps.0 == 0
    }
}
