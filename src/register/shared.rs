//! Register image shared by every motor on one shift register chain.

use std::sync::{Mutex, MutexGuard};

use crate::config::RegisterConfig;
use crate::error::{RegisterError, Result};

use super::driver::RegisterDriver;
use super::window::{BitWindow, WINDOW_BITS};

struct RegisterState<D> {
    image: u64,
    driver: D,
    next_window: u32,
}

/// One physical shift register chain and the image last pushed to it.
///
/// Every update merges a single motor's window into the image and transmits
/// the result while holding the register lock, so motors with independent
/// motion locks can still share a chain without tearing each other's bits.
pub struct SharedRegister<D: RegisterDriver> {
    state: Mutex<RegisterState<D>>,
    bit_width: u32,
}

impl<D: RegisterDriver> SharedRegister<D> {
    /// Create a register of `bit_width` bits with every output low.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBitWidth` unless the width is a multiple
    /// of 8 between 8 and 64.
    pub fn new(driver: D, bit_width: u32) -> Result<Self> {
        crate::config::validate_register(&RegisterConfig { bit_width })?;
        Ok(Self {
            state: Mutex::new(RegisterState {
                image: 0,
                driver,
                next_window: 0,
            }),
            bit_width,
        })
    }

    /// Create a register from configuration.
    pub fn from_config(driver: D, config: &RegisterConfig) -> Result<Self> {
        Self::new(driver, config.bit_width)
    }

    /// Total output bits.
    #[inline]
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Number of motor windows the chain provides.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.bit_width / WINDOW_BITS
    }

    fn lock(&self) -> core::result::Result<MutexGuard<'_, RegisterState<D>>, RegisterError> {
        self.state.lock().map_err(|_| RegisterError::Poisoned)
    }

    /// Hand out the next free window.
    ///
    /// Windows are assigned in call order and never handed out twice.
    ///
    /// # Errors
    ///
    /// Returns `RegisterError::WindowsExhausted` once every window is taken.
    pub fn allocate_window(&self) -> Result<BitWindow> {
        let mut state = self.lock()?;
        let window = BitWindow::new(state.next_window);
        if !window.fits(self.bit_width) {
            return Err(RegisterError::WindowsExhausted {
                capacity: self.capacity(),
            }
            .into());
        }
        state.next_window += 1;
        Ok(window)
    }

    /// Number of windows handed out so far.
    pub fn allocated(&self) -> Result<u32> {
        Ok(self.lock()?.next_window)
    }

    /// Write `pattern` into `window` and transmit the merged image once.
    ///
    /// The image is only updated if the transmission succeeds, so it always
    /// matches what the outputs last latched.
    pub fn apply(&self, window: BitWindow, pattern: u8) -> Result<u64> {
        let mut state = self.lock()?;
        let image = window.merge(state.image, pattern);
        state.driver.transmit(image, self.bit_width)?;
        state.image = image;
        Ok(image)
    }

    /// Current register image.
    pub fn image(&self) -> Result<u64> {
        Ok(self.lock()?.image)
    }

    /// Run `f` with exclusive access to the driver.
    pub fn with_driver<R>(&self, f: impl FnOnce(&mut D) -> R) -> Result<R> {
        let mut state = self.lock()?;
        Ok(f(&mut state.driver))
    }
}
