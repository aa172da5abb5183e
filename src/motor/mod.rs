//! Motor module for shift-stepper.
//!
//! Provides thread-backed stepper motors that share a shift register,
//! with angle tracking and rotation locks.

mod builder;
mod delay;
mod handle;
mod lock;
mod position;
mod sequencer;
mod stepper;
mod system;
mod worker;

pub use builder::StepperBuilder;
pub use delay::StdDelay;
pub use handle::{RotationHandle, RotationReport};
pub use lock::MotionLock;
pub use position::Position;
pub use sequencer::StepSequencer;
pub use stepper::Stepper;
pub use system::MotorSystem;
