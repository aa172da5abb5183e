//! Thread-backed stepper motor handle.

use std::sync::atomic::AtomicBool;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::units::{Degrees, Radians};
use crate::error::{Error, GeometryError, MotorError, Result};
use crate::geometry::{self, CylinderPlacement, CylinderTarget};
use crate::register::{BitWindow, RegisterDriver, SharedRegister};

use super::builder::StepperBuilder;
use super::delay::StdDelay;
use super::handle::{RotationHandle, RotationReport};
use super::lock::MotionLock;
use super::position::Position;
use super::worker::{Job, Move};

/// A stepper motor driven through a window of a shared shift register.
///
/// Rotation requests are queued to a dedicated worker thread and return
/// immediately with a [`RotationHandle`]. Requests to one motor run in the
/// order they were made; motors sharing a [`MotionLock`] never step at the
/// same time.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use shift_stepper::{Degrees, MemoryDriver, SharedRegister, Stepper};
///
/// let register = Arc::new(SharedRegister::new(MemoryDriver::new(), 8)?);
/// let bed = Stepper::builder(register.clone()).name("bed").build()?;
///
/// bed.rotate_absolute(Degrees(90.0))?.wait()?;
/// println!("bed at {}", bed.current_angle()?.value());
/// ```
pub struct Stepper<D: RegisterDriver> {
    name: heapless::String<32>,
    window: BitWindow,
    register: Arc<SharedRegister<D>>,
    position: Arc<Mutex<Position>>,
    lock: MotionLock,
    jobs: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl<D> Stepper<D>
where
    D: RegisterDriver + Send + 'static,
{
    /// Start building a motor on `register`.
    pub fn builder(register: Arc<SharedRegister<D>>) -> StepperBuilder<D, StdDelay> {
        StepperBuilder::new(register)
    }

    pub(crate) fn from_parts(
        name: heapless::String<32>,
        window: BitWindow,
        register: Arc<SharedRegister<D>>,
        position: Arc<Mutex<Position>>,
        lock: MotionLock,
        jobs: Sender<Job>,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            name,
            window,
            register,
            position,
            lock,
            jobs: Some(jobs),
            worker: Some(worker),
        }
    }
}

impl<D: RegisterDriver> Stepper<D> {
    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Register window this motor drives.
    #[inline]
    pub fn window(&self) -> BitWindow {
        self.window
    }

    /// Register this motor is attached to.
    #[inline]
    pub fn register(&self) -> &Arc<SharedRegister<D>> {
        &self.register
    }

    /// Rotation lock this motor takes while stepping.
    #[inline]
    pub fn motion_lock(&self) -> &MotionLock {
        &self.lock
    }

    fn submit(&self, request: Move) -> Result<RotationHandle> {
        let jobs = self.jobs.as_ref().ok_or(MotorError::WorkerUnavailable)?;
        let (reply, outcome) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        jobs.send(Job {
            request,
            cancel: cancel.clone(),
            reply,
        })
        .map_err(|_| MotorError::WorkerUnavailable)?;
        Ok(RotationHandle::new(outcome, cancel))
    }

    /// Queue a turn by `delta` degrees.
    ///
    /// Takes `floor(steps_per_degree * |delta|)` steps. Deltas beyond a full
    /// turn are not wrapped.
    pub fn rotate_relative(&self, delta: Degrees) -> Result<RotationHandle> {
        self.submit(Move::Relative(delta))
    }

    /// Queue a turn to `target` degrees along the shorter arc.
    ///
    /// The delta is worked out from the motor's angle when the rotation starts,
    /// after any rotations queued before it have finished.
    pub fn rotate_absolute(&self, target: Degrees) -> Result<RotationHandle> {
        self.submit(Move::Absolute(target))
    }

    /// [`rotate_relative`](Self::rotate_relative) and wait for it to finish.
    pub fn rotate_relative_blocking(&self, delta: Degrees) -> Result<RotationReport> {
        self.rotate_relative(delta)?.wait()
    }

    /// [`rotate_absolute`](Self::rotate_absolute) and wait for it to finish.
    pub fn rotate_absolute_blocking(&self, target: Degrees) -> Result<RotationReport> {
        self.rotate_absolute(target)?.wait()
    }

    /// Declare the current shaft angle to be 0 without moving.
    pub fn zero(&self) -> Result<()> {
        self.position
            .lock()
            .map_err(|_| MotorError::Poisoned)?
            .set_origin();
        Ok(())
    }

    /// Believed shaft angle in `[0, 360)`.
    ///
    /// Does not wait for a running rotation.
    pub fn current_angle(&self) -> Result<Degrees> {
        Ok(self
            .position
            .lock()
            .map_err(|_| MotorError::Poisoned)?
            .degrees())
    }

    /// Turn toward `target` in the horizontal plane.
    ///
    /// # Errors
    ///
    /// Returns `Error::Geometry` without moving if the heading cannot be resolved.
    pub fn aim_planar(&self, target: Radians, self_pos: Radians) -> Result<RotationHandle> {
        let heading = self.resolved(geometry::planar_bisector(target, self_pos))?;
        self.rotate_absolute(heading.to_degrees())
    }

    /// Tilt toward `target` from `placement`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Geometry` without moving if target and placement share
    /// an angular position or any value is not finite.
    pub fn aim_elevation(
        &self,
        placement: &CylinderPlacement,
        target: &CylinderTarget,
    ) -> Result<RotationHandle> {
        let tilt = self.resolved(geometry::elevation_from(placement, target))?;
        self.rotate_absolute(tilt.to_degrees())
    }

    fn resolved(&self, angle: core::result::Result<Radians, GeometryError>) -> Result<Radians> {
        angle.map_err(|e| {
            log::warn!("{}: target ignored: {}", self.name, e);
            Error::Geometry(e)
        })
    }

    /// Stop accepting rotations, let queued ones finish, and join the worker.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    pub(crate) fn stop(&mut self) -> Result<()> {
        // Closing the channel ends the worker loop once the queue drains.
        self.jobs.take();
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .map_err(|_| MotorError::WorkerUnavailable.into()),
            None => Ok(()),
        }
    }
}

impl<D: RegisterDriver> Drop for Stepper<D> {
    fn drop(&mut self) {
        if self.stop().is_err() {
            log::error!("{}: worker panicked", self.name);
        }
    }
}
