//! # shift-stepper
//!
//! Stepper motors multiplexed over one shared serial-to-parallel shift register.
//!
//! ## Features
//!
//! - **Shared register**: each motor owns a disjoint 4-bit window of one register image
//! - **embedded-hal 1.0**: `OutputPin` for DATA/CLOCK/LATCH, `DelayNs` for step timing
//! - **Worker per motor**: rotations are queued and stepped off the caller's thread
//! - **Rotation locks**: motors on one bus take turns, independent motors run together
//! - **Shortest path**: absolute moves always take the shorter arc
//! - **Cylinder aiming**: planar heading and elevation toward targets on a cylinder
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shift_stepper::{Degrees, MotionLock, SharedRegister, ShiftRegister, Stepper};
//!
//! let register = Arc::new(SharedRegister::new(ShiftRegister::new(data, clock, latch), 8)?);
//! let bus = MotionLock::new();
//!
//! let bed = Stepper::builder(register.clone()).name("bed").lock(bus.clone()).build()?;
//! let laser = Stepper::builder(register.clone()).name("laser").lock(bus).build()?;
//!
//! let a = bed.rotate_absolute(Degrees(90.0))?;
//! let b = laser.rotate_relative(Degrees(-45.0))?;
//! a.wait()?;
//! b.wait()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables motor workers, file I/O and TOML parsing
//! - `defmt`: Derives `defmt::Format` on plain data types for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod config;
pub mod error;
pub mod geometry;
pub mod motion;
#[cfg(feature = "std")]
pub mod motor;
pub mod register;

// Re-exports for ergonomic API
pub use config::{
    validate_config, AimRole, GeometryConfig, MotorConfig, RegisterConfig, SystemConfig,
};
pub use error::{Error, Result};
pub use geometry::{CylinderPlacement, CylinderTarget};
pub use motion::{shortest_delta, Direction, RotationPlan};
pub use register::{BitWindow, CoilSequence, RegisterDriver, ShiftRegister, COIL_SEQUENCE};

#[cfg(feature = "std")]
pub use motor::{
    MotionLock, MotorSystem, RotationHandle, RotationReport, StdDelay, Stepper, StepperBuilder,
};
#[cfg(feature = "std")]
pub use register::{MemoryDriver, SharedRegister};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, Radians, Steps};
