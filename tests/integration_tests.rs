//! Integration tests for shift-stepper.
//!
//! These tests verify the complete workflow from TOML parsing to motors
//! stepping through a shared register image.

use std::sync::Arc;

use shift_stepper::config::units::{Degrees, Radians};
use shift_stepper::error::MotorError;
use shift_stepper::register::{sequence_index, BitWindow, COIL_SEQUENCE};
use shift_stepper::{
    parse_config, CylinderTarget, Direction, Error, MemoryDriver, MotorSystem, SharedRegister,
    Stepper,
};

// =============================================================================
// Test configuration data
// =============================================================================

const STEPS_PER_DEGREE: f64 = 4096.0 / 360.0;

const TWO_AXIS_CONFIG: &str = r#"
[register]
bit_width = 8

[motors.bed]
name = "Bed"
step_delay_us = 1
bus = "main"
role = "planar"

[motors.laser]
name = "Laser"
step_delay_us = 1
bus = "main"
role = "elevation"

[geometry]
radius = 300.0
self_angle_rad = 0.0
self_height = 20.955
"#;

fn single_motor(recorder: &MemoryDriver) -> Stepper<MemoryDriver> {
    let register = Arc::new(SharedRegister::new(recorder.clone(), 8).unwrap());
    Stepper::builder(register)
        .name("solo")
        .step_delay_us(1)
        .build()
        .unwrap()
}

fn window_indices(history: &[u64], window: BitWindow) -> Vec<u8> {
    history
        .iter()
        .map(|&image| {
            sequence_index(window.extract(image)).expect("valid coil pattern")
        })
        .collect()
}

// =============================================================================
// Relative rotation
// =============================================================================

#[test]
fn relative_rotation_takes_floor_steps() {
    let recorder = MemoryDriver::new();
    let motor = single_motor(&recorder);

    let report = motor.rotate_relative_blocking(Degrees(45.0)).unwrap();

    assert_eq!(report.planned_steps, 512);
    assert_eq!(report.completed_steps, 512);
    assert_eq!(recorder.transmissions(), 512);
    assert!((motor.current_angle().unwrap().value() - 45.0).abs() < 1e-9);
}

#[test]
fn relative_rotation_walks_table_in_one_direction() {
    let recorder = MemoryDriver::new();
    let motor = single_motor(&recorder);

    let report = motor.rotate_relative_blocking(Degrees(-3.0)).unwrap();
    assert_eq!(report.direction, Direction::CounterClockwise);

    let indices = window_indices(&recorder.history(), motor.window());
    let mut previous = 0u8;
    for index in indices {
        assert_eq!(index, (previous + 7) % 8);
        previous = index;
    }
}

#[test]
fn relative_rotation_beyond_full_turn_is_not_wrapped() {
    let recorder = MemoryDriver::new();
    let motor = single_motor(&recorder);

    let report = motor.rotate_relative_blocking(Degrees(400.0)).unwrap();
    assert_eq!(report.completed_steps, (STEPS_PER_DEGREE * 400.0) as u32);
    assert!((motor.current_angle().unwrap().value() - 40.0).abs() < 0.1);
}

#[test]
fn zero_delta_takes_no_steps() {
    let recorder = MemoryDriver::new();
    let motor = single_motor(&recorder);

    let report = motor.rotate_relative_blocking(Degrees(0.0)).unwrap();
    assert_eq!(report.completed_steps, 0);
    assert_eq!(recorder.transmissions(), 0);
}

// =============================================================================
// Absolute rotation and zeroing
// =============================================================================

#[test]
fn absolute_rotation_takes_short_way_across_zero() {
    let recorder = MemoryDriver::new();
    let motor = single_motor(&recorder);

    motor.rotate_absolute_blocking(Degrees(170.0)).unwrap();
    let before = recorder.transmissions();

    let report = motor.rotate_absolute_blocking(Degrees(-170.0)).unwrap();
    assert!((report.delta.value() - 20.0).abs() < 0.1);
    assert_eq!(report.direction, Direction::Clockwise);
    let sent = recorder.transmissions() - before;
    assert_eq!(sent, report.completed_steps as usize);
    assert!(report.completed_steps <= 228);

    let angle = motor.current_angle().unwrap().value();
    assert!((angle - 190.0).abs() < 0.1, "angle {}", angle);
}

#[test]
fn queued_absolute_moves_resolve_in_order() {
    let recorder = MemoryDriver::new();
    let motor = single_motor(&recorder);

    let first = motor.rotate_absolute(Degrees(90.0)).unwrap();
    let second = motor.rotate_absolute(Degrees(45.0)).unwrap();
    let third = motor.rotate_absolute(Degrees(0.0)).unwrap();

    let first = first.wait().unwrap();
    let second = second.wait().unwrap();
    let third = third.wait().unwrap();

    assert!((first.delta.value() - 90.0).abs() < 1e-9);
    assert!((second.delta.value() + 45.0).abs() < 0.1);
    assert!((third.delta.value() + 45.0).abs() < 0.1);
    let angle = motor.current_angle().unwrap().value();
    assert!(angle < 0.1 || angle > 359.9, "angle {}", angle);
}

#[test]
fn zero_resets_angle_without_stepping() {
    let recorder = MemoryDriver::new();
    let motor = single_motor(&recorder);

    motor.rotate_relative_blocking(Degrees(30.0)).unwrap();
    let before = recorder.transmissions();

    motor.zero().unwrap();
    motor.zero().unwrap();

    assert_eq!(motor.current_angle().unwrap(), Degrees(0.0));
    assert_eq!(recorder.transmissions(), before);
}

// =============================================================================
// Transmission failure
// =============================================================================

#[test]
fn transmission_failure_reports_partial_progress() {
    let recorder = MemoryDriver::new().failing_after(100);
    let motor = single_motor(&recorder);

    let err = motor.rotate_relative_blocking(Degrees(90.0)).unwrap_err();
    match err {
        Error::Motor(MotorError::Aborted {
            completed,
            planned,
            ..
        }) => {
            assert_eq!(completed, 100);
            assert_eq!(planned, 1024);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let angle = motor.current_angle().unwrap().value();
    assert!((angle - 100.0 / STEPS_PER_DEGREE).abs() < 1e-9);
    assert!(!motor.motion_lock().is_locked());
}

// =============================================================================
// Configured system
// =============================================================================

#[test]
fn system_keeps_each_motor_in_its_window() {
    let recorder = MemoryDriver::new();
    let config = parse_config(TWO_AXIS_CONFIG).unwrap();
    let system = MotorSystem::from_config(config, recorder.clone()).unwrap();

    let bed = system.motor("bed").unwrap();
    let laser = system.motor("laser").unwrap();

    // 5 steps and 3 steps.
    let five = Degrees(5.0 / STEPS_PER_DEGREE + 1e-9);
    let three_back = Degrees(-3.0 / STEPS_PER_DEGREE - 1e-9);
    bed.rotate_relative_blocking(five).unwrap();
    laser.rotate_relative_blocking(three_back).unwrap();

    let image = system.register().image().unwrap();
    assert_eq!(bed.window().extract(image), COIL_SEQUENCE[5]);
    assert_eq!(laser.window().extract(image), COIL_SEQUENCE[5]);
    assert_eq!(recorder.transmissions(), 8);

    system.shutdown().unwrap();
}

#[test]
fn system_aims_both_axes_at_target() {
    let config = parse_config(TWO_AXIS_CONFIG).unwrap();
    let system = MotorSystem::from_config(config, MemoryDriver::new()).unwrap();

    // Target straight across the cylinder, 600 above: 45 degrees of tilt.
    let target = CylinderTarget::new(Radians(std::f64::consts::PI), 620.955);
    let handles = system.aim_at(&target).unwrap();
    assert_eq!(handles.len(), 2);
    for handle in handles {
        handle.wait().unwrap();
    }

    // Planar heading is 0.5 * (2pi - pi) = pi/2 rad = 90 degrees.
    let bed = system.motor("bed").unwrap().current_angle().unwrap().value();
    assert!((bed - 90.0).abs() < 0.1, "bed {}", bed);

    let laser = system.motor("laser").unwrap().current_angle().unwrap().value();
    assert!((laser - 45.0).abs() < 0.1, "laser {}", laser);
}

#[test]
fn planar_aim_at_own_position_turns_half_way() {
    let recorder = MemoryDriver::new();
    let motor = single_motor(&recorder);

    // Equal positions resolve to pi radians.
    let handle = motor.aim_planar(Radians(0.5), Radians(0.5)).unwrap();
    let report = handle.wait().unwrap();
    assert!((report.delta.value().abs() - 180.0).abs() < 1e-9);
}

#[test]
fn degenerate_elevation_is_rejected_without_motion() {
    let recorder = MemoryDriver::new();
    let motor = single_motor(&recorder);

    let placement = shift_stepper::CylinderPlacement {
        radius: 300.0,
        angle: Radians(1.0),
        height: 20.955,
    };
    let target = CylinderTarget::new(Radians(1.0), 20.955);

    let result = motor.aim_elevation(&placement, &target);
    assert!(matches!(result, Err(Error::Geometry(_))));
    assert_eq!(recorder.transmissions(), 0);
    assert_eq!(motor.current_angle().unwrap(), Degrees(0.0));
}
