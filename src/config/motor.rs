//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// Default micro-steps per output shaft revolution (geared 28BYJ-48 in half-step mode).
pub const DEFAULT_STEPS_PER_REVOLUTION: u32 = 4096;

/// Default delay between consecutive steps in microseconds.
pub const DEFAULT_STEP_DELAY_US: u32 = 2500;

/// What a motor aims at when a cylinder target is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum AimRole {
    /// Rotates in the horizontal plane toward the target's angular position.
    Planar,
    /// Tilts toward the target's height.
    Elevation,
}

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Micro-steps per output shaft revolution.
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u32,

    /// Fixed delay between steps in microseconds.
    #[serde(default = "default_step_delay_us")]
    pub step_delay_us: u32,

    /// Motors naming the same bus never step at the same time.
    ///
    /// Motors without a bus get a lock of their own.
    #[serde(default)]
    pub bus: Option<String<32>>,

    /// Optional aiming role for cylinder targets.
    #[serde(default)]
    pub role: Option<AimRole>,
}

fn default_steps_per_revolution() -> u32 {
    DEFAULT_STEPS_PER_REVOLUTION
}

fn default_step_delay_us() -> u32 {
    DEFAULT_STEP_DELAY_US
}

impl MotorConfig {
    /// Create a configuration with default resolution and timing.
    pub fn new(name: &str) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            step_delay_us: DEFAULT_STEP_DELAY_US,
            bus: None,
            role: None,
        }
    }

    /// Calculate steps per degree of output rotation.
    pub fn steps_per_degree(&self) -> f64 {
        self.steps_per_revolution as f64 / 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_steps_per_degree() {
        let config = MotorConfig::new("bed");
        assert!((config.steps_per_degree() - 4096.0 / 360.0).abs() < 1e-12);
        assert_eq!(config.step_delay_us, 2500);
        assert!(config.bus.is_none());
    }
}
