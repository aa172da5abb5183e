//! Per-motor step state machine.

use std::sync::Mutex;

use crate::error::{MotorError, Result};
use crate::motion::Direction;
use crate::register::{BitWindow, CoilSequence, RegisterDriver, SharedRegister};

use super::position::Position;

/// Walks one motor's coil sequence and writes it into that motor's window.
#[derive(Debug, Clone)]
pub struct StepSequencer {
    window: BitWindow,
    sequence: CoilSequence,
}

impl StepSequencer {
    /// Start at sequence position 0 in `window`.
    pub fn new(window: BitWindow) -> Self {
        Self {
            window,
            sequence: CoilSequence::new(),
        }
    }

    /// The register window this motor drives.
    #[inline]
    pub fn window(&self) -> BitWindow {
        self.window
    }

    /// Current index into the coil table.
    #[inline]
    pub fn sequence_position(&self) -> u8 {
        self.sequence.position()
    }

    /// Take one step.
    ///
    /// The new pattern is merged into the shared image and transmitted once;
    /// only then are the sequence position and the angle committed. A failed
    /// transmission leaves both untouched.
    pub fn step<D: RegisterDriver>(
        &mut self,
        direction: Direction,
        register: &SharedRegister<D>,
        position: &Mutex<Position>,
    ) -> Result<()> {
        let mut next = self.sequence;
        let pattern = next.advance(direction);
        register.apply(self.window, pattern)?;
        self.sequence = next;

        position
            .lock()
            .map_err(|_| MotorError::Poisoned)?
            .advance(direction);
        Ok(())
    }
}
