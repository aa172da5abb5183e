//! Target angle resolution on a shared cylinder.
//!
//! Units and targets sit on a cylinder around a common center. Angular
//! positions are measured in radians from a common zero.

use core::f64::consts::PI;

use libm::{atan, cos, fabs, sqrt};

use crate::config::units::Radians;
use crate::config::GeometryConfig;
use crate::error::GeometryError;

/// Chords shorter than this are treated as coincident points.
pub const MIN_CHORD: f64 = 1e-9;

/// This unit's placement on the cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CylinderPlacement {
    /// Cylinder radius shared by every unit and target.
    pub radius: f64,
    /// Angular position around the center.
    pub angle: Radians,
    /// Height of this unit.
    pub height: f64,
}

impl CylinderPlacement {
    /// Placement read from configuration.
    pub fn from_config(config: &GeometryConfig) -> Self {
        Self {
            radius: config.radius,
            angle: config.self_angle,
            height: config.self_height,
        }
    }
}

/// A point to aim at on the cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CylinderTarget {
    /// Angular position around the center.
    pub angle: Radians,
    /// Height of the target.
    pub height: f64,
}

impl CylinderTarget {
    /// Create a target.
    pub fn new(angle: Radians, height: f64) -> Self {
        Self { angle, height }
    }
}

fn finite(value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::NonFinite)
    }
}

/// Heading in the horizontal plane from `self_pos` toward `target`.
///
/// Half of the arc not spanned between the two positions,
/// `0.5 * (2π - |target - self_pos|)`, negated when `target < self_pos`.
/// Equal positions yield π.
pub fn planar_bisector(target: Radians, self_pos: Radians) -> Result<Radians, GeometryError> {
    let separation = finite(target.0)? - finite(self_pos.0)?;
    let mut alpha = 0.5 * (2.0 * PI - fabs(separation));
    if separation < 0.0 {
        alpha = -alpha;
    }
    finite(alpha).map(Radians)
}

/// Straight-line distance between two points `separation` apart on a circle of `radius`.
pub fn chord_length(radius: f64, separation: Radians) -> f64 {
    let r2 = radius * radius;
    let squared = 2.0 * r2 - 2.0 * r2 * cos(separation.0);
    // Rounding can leave a tiny negative value for coincident points.
    if squared <= 0.0 {
        0.0
    } else {
        sqrt(squared)
    }
}

/// Tilt from this unit up (or down) to a target on the cylinder.
///
/// `atan((target_height - self_height) / C)` where `C` is the chord between
/// the two angular positions.
///
/// # Errors
///
/// - `GeometryError::DegenerateChord` when the chord is shorter than [`MIN_CHORD`]
/// - `GeometryError::NonFinite` when any input or intermediate is NaN or infinite
pub fn elevation(
    target: Radians,
    self_pos: Radians,
    self_height: f64,
    target_height: f64,
    radius: f64,
) -> Result<Radians, GeometryError> {
    finite(target.0)?;
    finite(self_pos.0)?;
    let separation = target - self_pos;
    let rise = finite(target_height)? - finite(self_height)?;
    let chord = finite(chord_length(finite(radius)?, separation))?;
    if chord < MIN_CHORD {
        return Err(GeometryError::DegenerateChord { chord });
    }
    finite(atan(finite(rise / chord)?)).map(Radians)
}

/// [`planar_bisector`] from a placement.
pub fn planar_from(
    placement: &CylinderPlacement,
    target: &CylinderTarget,
) -> Result<Radians, GeometryError> {
    planar_bisector(target.angle, placement.angle)
}

/// [`elevation`] from a placement.
pub fn elevation_from(
    placement: &CylinderPlacement,
    target: &CylinderTarget,
) -> Result<Radians, GeometryError> {
    elevation(
        target.angle,
        placement.angle,
        placement.height,
        target.height,
        placement.radius,
    )
}
