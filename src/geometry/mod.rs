//! Geometry module for shift-stepper.
//!
//! Converts targets on a shared cylinder into absolute motor angles.

mod resolver;

pub use resolver::{
    chord_length, elevation, elevation_from, planar_bisector, planar_from, CylinderPlacement,
    CylinderTarget, MIN_CHORD,
};
