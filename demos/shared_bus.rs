//! Example: Several motors on one shift register.
//!
//! This example demonstrates how to:
//! - Describe a register chain, its motors and the unit geometry in TOML
//! - Share one rotation lock between motors on the same bus
//! - Queue rotations without blocking and wait for their reports
//! - Aim a planar and an elevation motor at a target on the cylinder
//!
//! Steps are recorded by an in-memory driver instead of real pins.
//!
//! Run with: `cargo run --example shared_bus --features std`

use shift_stepper::{
    parse_config, CylinderTarget, Degrees, Error, MemoryDriver, MotorSystem, Radians, Result,
};

const CONFIG: &str = r#"
[register]
bit_width = 16

[motors.bed]
name = "Bed"
step_delay_us = 200
bus = "main"
role = "planar"

[motors.laser]
name = "Laser"
step_delay_us = 200
bus = "main"
role = "elevation"

[motors.turret]
name = "Turret"
step_delay_us = 200

[geometry]
radius = 300.0
self_angle_rad = 0.0
self_height = 20.955
"#;

fn main() -> Result<()> {
    println!("=== Shared Register Example ===\n");

    let config = parse_config(CONFIG)?;
    let recorder = MemoryDriver::new();
    let system = MotorSystem::from_config(config, recorder.clone())?;

    let register = system.register();
    println!(
        "Register: {} bits, {} windows",
        register.bit_width(),
        register.capacity()
    );
    for name in system.motor_names() {
        let motor = system.motor_or_error(name)?;
        println!(
            "  {:<8} window {} (bits {}..{})",
            motor.name(),
            motor.window().index(),
            motor.window().bit_start(),
            motor.window().bit_start() + 4
        );
    }

    // Bed and laser share a bus and take turns; the turret runs alongside them.
    println!("\nQueueing rotations:");
    let bed = system.motor_or_error("bed")?.rotate_absolute(Degrees(90.0))?;
    let laser = system.motor_or_error("laser")?.rotate_relative(Degrees(-30.0))?;
    let turret = system.motor_or_error("turret")?.rotate_relative(Degrees(45.0))?;

    for (label, handle) in [("bed", bed), ("laser", laser), ("turret", turret)] {
        let report = handle.wait()?;
        println!(
            "  {:<8} {:>8.3}° in {} steps ({:?}) -> {:.3}°",
            label,
            report.delta.value(),
            report.completed_steps,
            report.direction,
            report.final_angle.value()
        );
    }

    println!("\nAiming at a target half way around the cylinder:");
    system.zero_all()?;
    let target = CylinderTarget::new(Radians(core::f64::consts::PI), 620.955);
    for handle in system.aim_at(&target)? {
        handle.wait()?;
    }
    for (name, angle) in system.angles()? {
        println!("  {:<8} {:.3}°", name, angle.value());
    }

    println!("\nA target on top of this unit is ignored:");
    match system.aim_at(&CylinderTarget::new(Radians(0.0), 50.0)) {
        Err(Error::Geometry(e)) => println!("  rejected: {}", e),
        Err(e) => return Err(e),
        Ok(_) => println!("  unexpectedly accepted"),
    }

    println!("\nTotal transmissions: {}", recorder.transmissions());
    if let Some(image) = recorder.last() {
        println!("Last register image: {:#018b}", image);
    }

    system.shutdown()?;
    println!("\n=== Example Complete ===");

    Ok(())
}
