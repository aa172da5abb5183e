//! Configuration module for shift-stepper.
//!
//! Provides types for loading and validating register, motor, and geometry
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod geometry;
mod motor;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use geometry::GeometryConfig;
pub use motor::{AimRole, MotorConfig, DEFAULT_STEPS_PER_REVOLUTION, DEFAULT_STEP_DELAY_US};
pub use system::{RegisterConfig, SystemConfig, DEFAULT_BIT_WIDTH};
pub use validation::validate_config;
pub(crate) use validation::{validate_motor, validate_register};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Radians, Steps};
