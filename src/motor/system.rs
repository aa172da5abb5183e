//! Motor system facade for multi-motor configuration.
//!
//! Builds one shared register and every configured motor from a single configuration.

use std::sync::Arc;

use heapless::{FnvIndexMap, String};

use crate::config::units::{Degrees, Radians};
use crate::config::{validate_config, AimRole, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::geometry::{self, CylinderPlacement, CylinderTarget};
use crate::register::{RegisterDriver, SharedRegister};

use super::handle::RotationHandle;
use super::lock::MotionLock;
use super::stepper::Stepper;

/// A facade for managing every motor on one shift register chain.
///
/// `MotorSystem` provides a high-level API for:
/// - Attaching motors to the register in configuration order
/// - Sharing rotation locks between motors on the same bus
/// - Accessing motors by name
/// - Aiming every motor with a role at a cylinder target
///
/// # Example
///
/// ```rust,ignore
/// use shift_stepper::{MemoryDriver, MotorSystem, parse_config};
///
/// let config = parse_config(CONFIG_TOML)?;
/// let system = MotorSystem::from_config(config, MemoryDriver::new())?;
///
/// if let Some(bed) = system.motor("bed") {
///     bed.rotate_absolute(Degrees(45.0))?.wait()?;
/// }
/// ```
pub struct MotorSystem<D: RegisterDriver> {
    /// The system configuration.
    config: SystemConfig,
    /// Register every motor writes to.
    register: Arc<SharedRegister<D>>,
    /// Motors by configuration key, in attachment order.
    motors: FnvIndexMap<String<32>, Stepper<D>, 16>,
    /// Where this unit sits, if geometry is configured.
    placement: Option<CylinderPlacement>,
}

impl<D> MotorSystem<D>
where
    D: RegisterDriver + Send + 'static,
{
    /// Validate `config`, create the register, and start every motor.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or a motor cannot be started.
    pub fn from_config(config: SystemConfig, driver: D) -> Result<Self> {
        validate_config(&config)?;

        let register = Arc::new(SharedRegister::from_config(driver, &config.register)?);
        let mut buses: FnvIndexMap<String<32>, MotionLock, 16> = FnvIndexMap::new();
        let mut motors = FnvIndexMap::new();

        for (key, motor_config) in config.motors.iter() {
            let lock = match motor_config.bus {
                Some(ref bus) => match buses.get(bus) {
                    Some(lock) => lock.clone(),
                    None => {
                        let lock = MotionLock::new();
                        buses
                            .insert(bus.clone(), lock.clone())
                            .map_err(|_| too_many(&config))?;
                        lock
                    }
                },
                None => MotionLock::new(),
            };

            let stepper = Stepper::builder(register.clone())
                .from_motor_config(motor_config)
                .lock(lock)
                .build()?;
            motors
                .insert(key.clone(), stepper)
                .map_err(|_| too_many(&config))?;
        }

        let placement = config.geometry.as_ref().map(CylinderPlacement::from_config);

        Ok(Self {
            config,
            register,
            motors,
            placement,
        })
    }
}

fn too_many(config: &SystemConfig) -> Error {
    Error::Config(ConfigError::TooManyMotors {
        motors: config.motors.len(),
        capacity: config.register.capacity(),
    })
}

impl<D: RegisterDriver> MotorSystem<D> {
    /// Get the system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Register shared by all motors.
    pub fn register(&self) -> &Arc<SharedRegister<D>> {
        &self.register
    }

    /// This unit's placement on the cylinder, if configured.
    pub fn placement(&self) -> Option<&CylinderPlacement> {
        self.placement.as_ref()
    }

    /// Get a motor by configuration key.
    pub fn motor(&self, name: &str) -> Option<&Stepper<D>> {
        self.motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a motor by configuration key, with error if not found.
    pub fn motor_or_error(&self, name: &str) -> Result<&Stepper<D>> {
        self.motor(name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })
    }

    /// List all motor keys in attachment order.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|s| s.as_str())
    }

    /// Reset every motor's angle to 0 without moving.
    pub fn zero_all(&self) -> Result<()> {
        for motor in self.motors.values() {
            motor.zero()?;
        }
        Ok(())
    }

    /// Current angle of every motor, in attachment order.
    pub fn angles(&self) -> Result<Vec<(&str, Degrees)>> {
        self.motors
            .iter()
            .map(|(name, motor)| Ok((name.as_str(), motor.current_angle()?)))
            .collect()
    }

    /// Point every motor that has an aiming role at `target`.
    ///
    /// All angles are resolved before any motor is moved, so a target that
    /// cannot be resolved leaves every motor where it is.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingField` if no geometry is configured
    /// - `Error::Geometry` if the target cannot be resolved for some motor
    pub fn aim_at(&self, target: &CylinderTarget) -> Result<Vec<RotationHandle>> {
        let placement = self
            .placement
            .as_ref()
            .ok_or(ConfigError::MissingField("geometry"))?;

        let mut resolved: Vec<(&Stepper<D>, Radians)> = Vec::new();
        for (key, motor_config) in self.config.motors.iter() {
            let angle = match motor_config.role {
                Some(AimRole::Planar) => geometry::planar_from(placement, target),
                Some(AimRole::Elevation) => geometry::elevation_from(placement, target),
                None => continue,
            };
            let angle = angle.map_err(|e| {
                log::warn!("{}: target ignored: {}", key, e);
                Error::Geometry(e)
            })?;
            if let Some(motor) = self.motor(key.as_str()) {
                resolved.push((motor, angle));
            }
        }

        resolved
            .into_iter()
            .map(|(motor, angle)| motor.rotate_absolute(angle.to_degrees()))
            .collect()
    }

    /// Let queued rotations finish and stop every worker.
    pub fn shutdown(mut self) -> Result<()> {
        let mut first_error = None;
        for motor in self.motors.values_mut() {
            if let Err(e) = motor.stop() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::register::MemoryDriver;

    const CONFIG: &str = r#"
[register]
bit_width = 16

[motors.bed]
name = "Bed"
step_delay_us = 1
bus = "main"
role = "planar"

[motors.laser]
name = "Laser"
step_delay_us = 1
bus = "main"
role = "elevation"

[motors.spare]
name = "Spare"
step_delay_us = 1

[geometry]
radius = 300.0
self_angle_rad = 0.0
self_height = 20.955
"#;

    fn system() -> MotorSystem<MemoryDriver> {
        let config = parse_config(CONFIG).unwrap();
        MotorSystem::from_config(config, MemoryDriver::new()).unwrap()
    }

    #[test]
    fn test_windows_follow_configuration_order() {
        let system = system();
        let names: Vec<_> = system.motor_names().collect();
        assert_eq!(names, ["bed", "laser", "spare"]);
        assert_eq!(system.motor("bed").unwrap().window().index(), 0);
        assert_eq!(system.motor("laser").unwrap().window().index(), 1);
        assert_eq!(system.motor("spare").unwrap().window().index(), 2);
        assert_eq!(system.register().allocated().unwrap(), 3);
    }

    #[test]
    fn test_bus_shares_lock() {
        let system = system();
        let bed = system.motor("bed").unwrap().motion_lock();
        let laser = system.motor("laser").unwrap().motion_lock();
        let spare = system.motor("spare").unwrap().motion_lock();
        assert!(bed.is_shared_with(laser));
        assert!(!bed.is_shared_with(spare));
    }

    #[test]
    fn test_unknown_motor() {
        let system = system();
        assert!(matches!(
            system.motor_or_error("tilt"),
            Err(Error::Config(ConfigError::MotorNotFound(_)))
        ));
    }

    #[test]
    fn test_degenerate_target_moves_nothing() {
        let system = system();
        let recorder_len = system
            .register()
            .with_driver(|d| d.transmissions())
            .unwrap();

        // Same angular position as this unit: elevation is undefined.
        let target = CylinderTarget::new(Radians(0.0), 50.0);
        let result = system.aim_at(&target);
        assert!(matches!(result, Err(Error::Geometry(_))));

        let after = system
            .register()
            .with_driver(|d| d.transmissions())
            .unwrap();
        assert_eq!(recorder_len, after);
        assert_eq!(recorder_len, 0);
    }

    #[test]
    fn test_zero_all() {
        let system = system();
        system
            .motor("spare")
            .unwrap()
            .rotate_relative_blocking(Degrees(30.0))
            .unwrap();
        system.zero_all().unwrap();
        for (_, angle) in system.angles().unwrap() {
            assert_eq!(angle, Degrees(0.0));
        }
        system.shutdown().unwrap();
    }
}
