//! Step cadence tests: the step delay follows every step, across rotation boundaries.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use embedded_hal::delay::DelayNs;

use shift_stepper::register::RegisterDriver;
use shift_stepper::{Degrees, MotionLock, SharedRegister, StdDelay, Stepper};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    Transmit,
    Delay(u32),
}

type Log = Arc<Mutex<Vec<Event>>>;

/// Logs transmissions into a shared event log.
struct LoggingDriver {
    log: Log,
}

impl RegisterDriver for LoggingDriver {
    fn transmit(&mut self, _value: u64, _bit_width: u32) -> shift_stepper::Result<()> {
        self.log.lock().unwrap().push(Event::Transmit);
        Ok(())
    }
}

/// Logs delay requests into the same log without sleeping.
#[derive(Clone)]
struct LoggingDelay {
    log: Log,
}

impl DelayNs for LoggingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.lock().unwrap().push(Event::Delay(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.lock().unwrap().push(Event::Delay(us));
    }
}

/// Records when each image was transmitted.
struct TimestampDriver {
    times: Arc<Mutex<Vec<Instant>>>,
}

impl RegisterDriver for TimestampDriver {
    fn transmit(&mut self, _value: u64, _bit_width: u32) -> shift_stepper::Result<()> {
        self.times.lock().unwrap().push(Instant::now());
        Ok(())
    }
}

fn assert_strict_cadence(events: &[Event], steps: usize, delay_us: u32) {
    assert_eq!(events.len(), 2 * steps);
    for pair in events.chunks(2) {
        assert_eq!(pair, [Event::Transmit, Event::Delay(delay_us)]);
    }
}

#[test]
fn queued_rotations_keep_the_step_delay_between_them() {
    let log = Log::default();
    let driver = LoggingDriver { log: log.clone() };
    let register = Arc::new(SharedRegister::new(driver, 8).unwrap());
    let motor = Stepper::builder(register)
        .name("bed")
        .step_delay_us(2500)
        .delay(LoggingDelay { log: log.clone() })
        .build()
        .unwrap();

    let first = motor.rotate_relative(Degrees(1.0)).unwrap();
    let second = motor.rotate_relative(Degrees(-1.0)).unwrap();
    assert_eq!(first.wait().unwrap().completed_steps, 11);
    assert_eq!(second.wait().unwrap().completed_steps, 11);

    assert_strict_cadence(&log.lock().unwrap(), 22, 2500);
}

#[test]
fn motors_on_one_bus_keep_the_step_delay_between_them() {
    let log = Log::default();
    let driver = LoggingDriver { log: log.clone() };
    let register = Arc::new(SharedRegister::new(driver, 8).unwrap());
    let bus = MotionLock::new();
    let build = |name: &str| {
        Stepper::builder(register.clone())
            .name(name)
            .lock(bus.clone())
            .step_delay_us(1200)
            .delay(LoggingDelay { log: log.clone() })
            .build()
            .unwrap()
    };
    let bed = build("bed");
    let laser = build("laser");

    let a = bed.rotate_relative(Degrees(2.0)).unwrap();
    let b = laser.rotate_relative(Degrees(-2.0)).unwrap();
    a.wait().unwrap();
    b.wait().unwrap();

    // The lock is only released after the last step's delay, so a sibling
    // never transmits inside another motor's settle time.
    assert_strict_cadence(&log.lock().unwrap(), 2 * 22, 1200);
}

#[test]
fn transmissions_are_spaced_by_the_step_delay() {
    const DELAY_US: u32 = 3000;

    let times = Arc::new(Mutex::new(Vec::new()));
    let driver = TimestampDriver {
        times: times.clone(),
    };
    let register = Arc::new(SharedRegister::new(driver, 8).unwrap());
    let motor = Stepper::builder(register)
        .name("bed")
        .step_delay_us(DELAY_US)
        .delay(StdDelay)
        .build()
        .unwrap();

    let first = motor.rotate_relative(Degrees(1.0)).unwrap();
    let second = motor.rotate_relative(Degrees(1.0)).unwrap();
    first.wait().unwrap();
    second.wait().unwrap();

    let times = times.lock().unwrap();
    assert_eq!(times.len(), 22);
    for pair in times.windows(2) {
        let gap = pair[1].duration_since(pair[0]).as_micros();
        assert!(gap >= DELAY_US as u128, "steps only {} us apart", gap);
    }
}
