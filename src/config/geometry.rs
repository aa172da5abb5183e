//! Cylinder geometry configuration.

use serde::Deserialize;

use super::units::Radians;

/// Where this unit sits on the shared cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeometryConfig {
    /// Radius of the cylinder all units and targets sit on.
    pub radius: f64,

    /// This unit's angular position around the center.
    #[serde(rename = "self_angle_rad", default)]
    pub self_angle: Radians,

    /// This unit's height.
    #[serde(default)]
    pub self_height: f64,
}
