//! Property tests for shortest-path math, window isolation and step counts.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use shift_stepper::motor::{Position, StepSequencer};
use shift_stepper::register::COIL_SEQUENCE;
use shift_stepper::{shortest_delta, Degrees, Direction, MemoryDriver, SharedRegister, Stepper};

const STEPS_PER_DEGREE: f64 = 4096.0 / 360.0;

fn wrap(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

proptest! {
    #[test]
    fn shortest_delta_is_short_and_lands_on_target(
        current in -1080.0f64..1080.0,
        target in -1080.0f64..1080.0,
    ) {
        let delta = shortest_delta(Degrees(current), Degrees(target)).value();
        prop_assert!(delta > -180.0 && delta <= 180.0);

        let landed = wrap(current + delta);
        let goal = wrap(target);
        let error = (landed - goal).abs();
        prop_assert!(error < 1e-6 || (360.0 - error) < 1e-6);
    }

    #[test]
    fn steps_never_touch_other_windows(
        moves in prop::collection::vec((0usize..4, any::<bool>()), 1..200),
    ) {
        let register = SharedRegister::new(MemoryDriver::new(), 16).unwrap();
        let mut motors: Vec<(StepSequencer, Mutex<Position>)> = (0..4)
            .map(|_| {
                (
                    StepSequencer::new(register.allocate_window().unwrap()),
                    Mutex::new(Position::new(STEPS_PER_DEGREE)),
                )
            })
            .collect();
        let mut model = [0usize; 4];
        let mut touched = [false; 4];

        for (motor, clockwise) in moves {
            let direction = if clockwise {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            let (sequencer, position) = &mut motors[motor];
            sequencer.step(direction, &register, position).unwrap();

            let forward = if clockwise { 1 } else { 7 };
            model[motor] = (model[motor] + forward) % 8;
            touched[motor] = true;

            let image = register.image().unwrap();
            for (index, (sequencer, _)) in motors.iter().enumerate() {
                let expected = if touched[index] { COIL_SEQUENCE[model[index]] } else { 0 };
                prop_assert_eq!(sequencer.window().extract(image), expected);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn relative_rotation_takes_floor_steps_one_way(delta in -400.0f64..400.0) {
        let recorder = MemoryDriver::new();
        let register = Arc::new(SharedRegister::new(recorder.clone(), 8).unwrap());
        let motor = Stepper::builder(register).step_delay_us(1).build().unwrap();

        let report = motor.rotate_relative_blocking(Degrees(delta)).unwrap();
        let expected = (STEPS_PER_DEGREE * delta.abs()) as u32;
        prop_assert_eq!(report.completed_steps, expected);
        prop_assert_eq!(recorder.transmissions(), expected as usize);

        let window = motor.window();
        let forward = if delta > 0.0 { 1 } else { 7 };
        let mut previous = 0usize;
        for image in recorder.history() {
            let pattern = window.extract(image);
            let index = COIL_SEQUENCE.iter().position(|&p| p == pattern).unwrap();
            prop_assert_eq!(index, (previous + forward) % 8);
            previous = index;
        }
    }
}
