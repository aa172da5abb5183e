//! Builder pattern for Stepper.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use embedded_hal::delay::DelayNs;

use crate::config::{
    validate_motor, MotorConfig, DEFAULT_STEPS_PER_REVOLUTION, DEFAULT_STEP_DELAY_US,
};
use crate::error::{MotorError, Result};
use crate::register::{RegisterDriver, SharedRegister};

use super::delay::StdDelay;
use super::lock::MotionLock;
use super::position::Position;
use super::sequencer::StepSequencer;
use super::stepper::Stepper;
use super::worker::Worker;

/// Builder for creating Stepper instances.
///
/// Building assigns the next free window of the register, so motors must be
/// built in the order they are wired to the chain.
pub struct StepperBuilder<D, DELAY>
where
    D: RegisterDriver,
    DELAY: DelayNs,
{
    register: Arc<SharedRegister<D>>,
    delay: DELAY,
    name: Option<heapless::String<32>>,
    lock: Option<MotionLock>,
    steps_per_revolution: u32,
    step_delay_us: u32,
}

impl<D> StepperBuilder<D, StdDelay>
where
    D: RegisterDriver,
{
    /// Create a new builder for a motor on `register`.
    pub fn new(register: Arc<SharedRegister<D>>) -> Self {
        Self {
            register,
            delay: StdDelay,
            name: None,
            lock: None,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            step_delay_us: DEFAULT_STEP_DELAY_US,
        }
    }
}

impl<D, DELAY> StepperBuilder<D, DELAY>
where
    D: RegisterDriver,
    DELAY: DelayNs,
{
    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Share a rotation lock with other motors.
    ///
    /// Without one the motor gets a lock of its own.
    pub fn lock(mut self, lock: MotionLock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Set micro-steps per output revolution.
    pub fn steps_per_revolution(mut self, steps: u32) -> Self {
        self.steps_per_revolution = steps;
        self
    }

    /// Set the fixed delay between steps in microseconds.
    pub fn step_delay_us(mut self, us: u32) -> Self {
        self.step_delay_us = us;
        self
    }

    /// Use a different delay provider for step timing.
    pub fn delay<NEW: DelayNs>(self, delay: NEW) -> StepperBuilder<D, NEW> {
        StepperBuilder {
            register: self.register,
            delay,
            name: self.name,
            lock: self.lock,
            steps_per_revolution: self.steps_per_revolution,
            step_delay_us: self.step_delay_us,
        }
    }

    /// Configure from a MotorConfig.
    ///
    /// The configured bus is resolved to a lock by the caller.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.steps_per_revolution = config.steps_per_revolution;
        self.step_delay_us = config.step_delay_us;
        self
    }

    fn motor_config(&self, name: &heapless::String<32>) -> MotorConfig {
        MotorConfig {
            name: name.clone(),
            steps_per_revolution: self.steps_per_revolution,
            step_delay_us: self.step_delay_us,
            bus: None,
            role: None,
        }
    }
}

impl<D, DELAY> StepperBuilder<D, DELAY>
where
    D: RegisterDriver + Send + 'static,
    DELAY: DelayNs + Send + 'static,
{
    /// Assign a register window and start the motor's worker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution or delay is zero, the register has
    /// no free window, or the thread cannot be spawned.
    pub fn build(self) -> Result<Stepper<D>> {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| heapless::String::try_from("motor").unwrap_or_default());
        validate_motor(&self.motor_config(&name))?;

        let window = self.register.allocate_window()?;
        let steps_per_degree = self.steps_per_revolution as f64 / 360.0;
        let position = Arc::new(Mutex::new(Position::new(steps_per_degree)));
        let lock = self.lock.unwrap_or_default();

        let worker = Worker {
            name: name.clone(),
            sequencer: StepSequencer::new(window),
            register: self.register.clone(),
            position: position.clone(),
            lock: lock.clone(),
            delay: self.delay,
            step_delay_us: self.step_delay_us,
        };

        let (jobs, queue) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(format!("stepper-{}", name))
            .spawn(move || worker.run(queue))
            .map_err(|_| MotorError::SpawnFailed)?;

        log::debug!("{}: attached to register window {}", name, window.index());

        Ok(Stepper::from_parts(
            name,
            window,
            self.register,
            position,
            lock,
            jobs,
            handle,
        ))
    }
}
