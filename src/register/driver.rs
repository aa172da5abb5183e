//! Serial-in/parallel-out shift register output.
//!
//! Generic over embedded-hal 1.0 output pins for DATA, CLOCK, and LATCH.

use embedded_hal::digital::OutputPin;

use crate::error::{RegisterError, Result};

/// Pushes a full register image out to the hardware.
pub trait RegisterDriver {
    /// Shift out the low `bit_width` bits of `value`, then latch them onto the outputs.
    fn transmit(&mut self, value: u64, bit_width: u32) -> Result<()>;
}

/// Three-wire shift register chain (74HC595 style).
///
/// Bits are shifted most significant first, so the highest bit of the image
/// ends up on the last output of the chain.
pub struct ShiftRegister<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
{
    data: DATA,
    clock: CLOCK,
    latch: LATCH,
}

impl<DATA, CLOCK, LATCH> ShiftRegister<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
{
    /// Create a driver from the three control pins.
    pub fn new(data: DATA, clock: CLOCK, latch: LATCH) -> Self {
        Self { data, clock, latch }
    }

    /// Give the pins back.
    pub fn release(self) -> (DATA, CLOCK, LATCH) {
        (self.data, self.clock, self.latch)
    }

    fn pulse<P: OutputPin>(pin: &mut P) -> core::result::Result<(), RegisterError> {
        pin.set_high().map_err(|_| RegisterError::PinError)?;
        pin.set_low().map_err(|_| RegisterError::PinError)
    }

    fn shift_out(&mut self, value: u64, bit_width: u32) -> core::result::Result<(), RegisterError> {
        for bit in (0..bit_width).rev() {
            if (value >> bit) & 1 == 1 {
                self.data.set_high().map_err(|_| RegisterError::PinError)?;
            } else {
                self.data.set_low().map_err(|_| RegisterError::PinError)?;
            }
            Self::pulse(&mut self.clock)?;
        }
        Self::pulse(&mut self.latch)
    }
}

impl<DATA, CLOCK, LATCH> RegisterDriver for ShiftRegister<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
{
    fn transmit(&mut self, value: u64, bit_width: u32) -> Result<()> {
        self.shift_out(value, bit_width.min(64))?;
        Ok(())
    }
}
