//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{GeometryConfig, MotorConfig, RegisterConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Register width is a multiple of 8 between 8 and 64 bits
/// - Every motor fits in its own 4-bit window
/// - Motor resolution and step delay are positive
/// - Cylinder radius is positive and finite
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_register(&config.register)?;

    let capacity = config.register.capacity();
    if config.motors.len() > capacity {
        return Err(Error::Config(ConfigError::TooManyMotors {
            motors: config.motors.len(),
            capacity,
        }));
    }

    for (_, motor) in config.motors.iter() {
        validate_motor(motor)?;
    }

    if let Some(ref geometry) = config.geometry {
        validate_geometry(geometry)?;
    }

    Ok(())
}

pub(crate) fn validate_register(config: &RegisterConfig) -> Result<()> {
    let width = config.bit_width;
    if width == 0 || width > 64 || width % 8 != 0 {
        return Err(Error::Config(ConfigError::InvalidBitWidth(width)));
    }
    Ok(())
}

pub(crate) fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    if config.step_delay_us == 0 {
        return Err(Error::Config(ConfigError::InvalidStepDelay(
            config.step_delay_us,
        )));
    }

    Ok(())
}

fn validate_geometry(config: &GeometryConfig) -> Result<()> {
    if !config.radius.is_finite() || config.radius <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidRadius(config.radius)));
    }
    Ok(())
}
