//! Register module for shift-stepper.
//!
//! Provides the coil table, per-motor bit windows, the shift register driver,
//! and the register image shared by all motors on one chain.

mod coil;
mod driver;
#[cfg(feature = "std")]
mod memory;
#[cfg(feature = "std")]
mod shared;
mod window;

pub use coil::{CoilSequence, COIL_SEQUENCE, SEQUENCE_LEN};
pub use driver::{RegisterDriver, ShiftRegister};
#[cfg(feature = "std")]
pub use memory::MemoryDriver;
#[cfg(feature = "std")]
pub use shared::SharedRegister;
pub use window::{sequence_index, BitWindow, WINDOW_BITS};
