//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::geometry::GeometryConfig;
use super::motor::MotorConfig;

/// Default register chain width (one 8-bit shift register).
pub const DEFAULT_BIT_WIDTH: u32 = 8;

/// Shift register chain configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RegisterConfig {
    /// Total output bits across the chain.
    #[serde(default = "default_bit_width")]
    pub bit_width: u32,
}

fn default_bit_width() -> u32 {
    DEFAULT_BIT_WIDTH
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            bit_width: DEFAULT_BIT_WIDTH,
        }
    }
}

impl RegisterConfig {
    /// Number of 4-bit motor windows the chain provides.
    pub fn capacity(&self) -> usize {
        (self.bit_width / 4) as usize
    }
}

/// Root configuration structure from TOML.
///
/// Motors are attached to the register in the order they appear.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Register chain shared by every motor.
    #[serde(default)]
    pub register: RegisterConfig,

    /// Named motor configurations.
    pub motors: FnvIndexMap<String<32>, MotorConfig, 16>,

    /// Optional cylinder geometry for target aiming.
    #[serde(default)]
    pub geometry: Option<GeometryConfig>,
}

impl SystemConfig {
    /// Get a motor configuration by name.
    pub fn motor(&self, name: &str) -> Option<&MotorConfig> {
        self.motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all motor names in attachment order.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            register: RegisterConfig::default(),
            motors: FnvIndexMap::new(),
            geometry: None,
        }
    }
}
