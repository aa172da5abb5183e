//! In-memory register driver for simulation and tests.

use std::sync::{Arc, Mutex};

use crate::error::{RegisterError, Result};

use super::driver::RegisterDriver;

/// Records every transmitted register image instead of driving pins.
///
/// Clones share one history, so a clone kept by the caller can inspect what a
/// driver moved into a [`SharedRegister`](super::SharedRegister) has sent.
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    history: Arc<Mutex<Vec<u64>>>,
    fail_after: Option<usize>,
}

impl MemoryDriver {
    /// Create an empty recording driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every transmission after the first `count` succeed.
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Snapshot of all images transmitted so far, oldest first.
    pub fn history(&self) -> Vec<u64> {
        match self.history.lock() {
            Ok(h) => h.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of successful transmissions.
    pub fn transmissions(&self) -> usize {
        self.history().len()
    }

    /// Most recently transmitted image.
    pub fn last(&self) -> Option<u64> {
        self.history().last().copied()
    }
}

impl RegisterDriver for MemoryDriver {
    fn transmit(&mut self, value: u64, bit_width: u32) -> Result<()> {
        let mut history = self.history.lock().map_err(|_| RegisterError::Poisoned)?;
        if let Some(limit) = self.fail_after {
            if history.len() >= limit {
                return Err(RegisterError::PinError.into());
            }
        }
        let mask = if bit_width >= 64 {
            u64::MAX
        } else {
            (1u64 << bit_width) - 1
        };
        history.push(value & mask);
        Ok(())
    }
}
