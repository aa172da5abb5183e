//! Motion module for shift-stepper.
//!
//! Provides rotation planning, shortest-path math, and step bookkeeping.

mod direction;
mod executor;
mod plan;

pub use direction::Direction;
pub use executor::RotationExecutor;
pub use plan::{normalize_degrees, shortest_delta, RotationPlan};
