//! Handles to rotations running on a motor's worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use crate::config::units::Degrees;
use crate::error::{MotorError, Result};
use crate::motion::Direction;

/// What a finished rotation did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationReport {
    /// Relative delta that was executed.
    pub delta: Degrees,
    /// Direction of every step.
    pub direction: Direction,
    /// Steps the plan called for.
    pub planned_steps: u32,
    /// Steps actually taken.
    pub completed_steps: u32,
    /// Whether the rotation was cancelled before finishing.
    pub cancelled: bool,
    /// Motor angle after the last step.
    pub final_angle: Degrees,
}

/// A queued or running rotation.
///
/// Dropping the handle does not stop the rotation.
#[derive(Debug)]
pub struct RotationHandle {
    reply: Receiver<Result<RotationReport>>,
    cancel: Arc<AtomicBool>,
}

impl RotationHandle {
    pub(crate) fn new(reply: Receiver<Result<RotationReport>>, cancel: Arc<AtomicBool>) -> Self {
        Self { reply, cancel }
    }

    /// Ask the rotation to stop before its next step.
    ///
    /// A rotation still waiting for its lock ends without taking any steps.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// Block until the rotation finishes.
    ///
    /// # Errors
    ///
    /// Returns the rotation's own error, or `MotorError::WorkerUnavailable`
    /// if the worker stopped without answering.
    pub fn wait(self) -> Result<RotationReport> {
        self.reply
            .recv()
            .map_err(|_| MotorError::WorkerUnavailable)?
    }

    /// Block for at most `timeout`.
    ///
    /// Returns `Ok(self)` if the rotation is still running so the caller can
    /// keep waiting.
    pub fn wait_timeout(
        self,
        timeout: Duration,
    ) -> core::result::Result<Result<RotationReport>, Self> {
        match self.reply.recv_timeout(timeout) {
            Ok(outcome) => Ok(outcome),
            Err(RecvTimeoutError::Timeout) => Err(self),
            Err(RecvTimeoutError::Disconnected) => Ok(Err(MotorError::WorkerUnavailable.into())),
        }
    }
}
