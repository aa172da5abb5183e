//! Dedicated stepping thread for one motor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;

use crate::config::units::Degrees;
use crate::error::{Error, MotorError, Result};
use crate::motion::{RotationExecutor, RotationPlan};
use crate::register::{RegisterDriver, SharedRegister};

use super::handle::RotationReport;
use super::lock::MotionLock;
use super::position::Position;
use super::sequencer::StepSequencer;

/// Requested motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Move {
    /// Turn by a delta from wherever the motor is when the job starts.
    Relative(Degrees),
    /// Turn to an absolute angle along the shorter arc.
    Absolute(Degrees),
}

pub(crate) struct Job {
    pub(crate) request: Move,
    pub(crate) cancel: Arc<AtomicBool>,
    pub(crate) reply: Sender<Result<RotationReport>>,
}

/// Owns everything the stepping loop touches.
pub(crate) struct Worker<D, DELAY>
where
    D: RegisterDriver,
    DELAY: DelayNs,
{
    pub(crate) name: heapless::String<32>,
    pub(crate) sequencer: StepSequencer,
    pub(crate) register: Arc<SharedRegister<D>>,
    pub(crate) position: Arc<Mutex<Position>>,
    pub(crate) lock: MotionLock,
    pub(crate) delay: DELAY,
    pub(crate) step_delay_us: u32,
}

impl<D, DELAY> Worker<D, DELAY>
where
    D: RegisterDriver,
    DELAY: DelayNs,
{
    /// Serve jobs in arrival order until every sender is gone.
    pub(crate) fn run(mut self, jobs: Receiver<Job>) {
        log::debug!("{}: worker started", self.name);
        while let Ok(job) = jobs.recv() {
            let outcome = self.execute(job.request, &job.cancel);
            // Nobody may be waiting for fire-and-forget rotations.
            let _ = job.reply.send(outcome);
        }
        log::debug!("{}: worker stopped", self.name);
    }

    fn resolve(&self, request: Move) -> Result<Degrees> {
        match request {
            Move::Relative(delta) => Ok(delta),
            Move::Absolute(target) => {
                let position = self.position.lock().map_err(|_| MotorError::Poisoned)?;
                Ok(position.shortest_delta_to(target))
            }
        }
    }

    fn current_angle(&self) -> Result<Degrees> {
        Ok(self
            .position
            .lock()
            .map_err(|_| MotorError::Poisoned)?
            .degrees())
    }

    fn execute(&mut self, request: Move, cancel: &AtomicBool) -> Result<RotationReport> {
        let delta = self.resolve(request)?;
        let steps_per_degree = self
            .position
            .lock()
            .map_err(|_| MotorError::Poisoned)?
            .steps_per_degree();
        let plan = RotationPlan::relative(delta, steps_per_degree).map_err(|e| {
            log::warn!("{}: rotation rejected: {}", self.name, e);
            e
        })?;

        // Held until this function returns, on every path.
        let _guard = self.lock.acquire();
        log::debug!(
            "{}: rotating {} deg, {} steps",
            self.name,
            plan.delta.value(),
            plan.steps.value()
        );

        let mut executor = RotationExecutor::new(plan);
        let mut cancelled = false;
        while !executor.is_complete() {
            if cancel.load(Ordering::Acquire) {
                cancelled = true;
                log::info!(
                    "{}: rotation cancelled after {} of {} steps",
                    self.name,
                    executor.steps_taken(),
                    executor.total_steps()
                );
                break;
            }

            match self
                .sequencer
                .step(plan.direction, &self.register, &self.position)
            {
                Ok(()) => {}
                Err(Error::Register(cause)) => {
                    log::error!(
                        "{}: register failure after {} of {} steps: {}",
                        self.name,
                        executor.steps_taken(),
                        executor.total_steps(),
                        cause
                    );
                    return Err(MotorError::Aborted {
                        completed: executor.steps_taken(),
                        planned: executor.total_steps(),
                        cause,
                    }
                    .into());
                }
                Err(other) => return Err(other),
            }

            // Every step, the last one included, is followed by the full delay
            // while the lock is still held.
            executor.advance();
            self.delay.delay_us(self.step_delay_us);
        }

        let report = RotationReport {
            delta: plan.delta,
            direction: plan.direction,
            planned_steps: executor.total_steps(),
            completed_steps: executor.steps_taken(),
            cancelled,
            final_angle: self.current_angle()?,
        };
        log::debug!(
            "{}: rotation finished at {} deg",
            self.name,
            report.final_angle.value()
        );
        Ok(report)
    }
}
