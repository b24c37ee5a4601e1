//! Drive-side quantities: shaft speed, torque, gear ratio, horsepower and
//! throughput capacity.

use std::f64::consts::PI;

use crate::formulas::safe_div;
use crate::units::{Fpm, InLbf, Inches, Ipm, Lbf, Rpm};

/// Horsepower constant: 1 hp = 33,000 ft-lbf/min
const FT_LBF_PER_MIN_PER_HP: f64 = 33_000.0;

/// Drive shaft speed from belt speed and drive pulley circumference
pub fn drive_shaft_rpm(belt_speed: Fpm, drive_pulley_diameter: Inches) -> Rpm {
    let speed: Ipm = belt_speed.into();
    Rpm(safe_div(speed.0, PI * drive_pulley_diameter.0))
}

/// Torque at the drive shaft including the safety factor
pub fn drive_torque(belt_pull: Lbf, drive_pulley_diameter: Inches, safety_factor: f64) -> InLbf {
    InLbf(belt_pull.0 * (drive_pulley_diameter.0 / 2.0) * safety_factor)
}

/// Required reduction between motor and drive shaft
pub fn gear_ratio(motor_rpm: Rpm, shaft_rpm: Rpm) -> f64 {
    safe_div(motor_rpm.0, shaft_rpm.0)
}

/// Motor horsepower to move the belt pull at belt speed, with safety factor
pub fn horsepower(belt_pull: Lbf, belt_speed: Fpm, safety_factor: f64) -> f64 {
    belt_pull.0 * belt_speed.0 / FT_LBF_PER_MIN_PER_HP * safety_factor
}

/// Parts per hour the belt can deliver at a given part pitch (in)
pub fn capacity_pph(belt_speed: Fpm, part_pitch_in: f64) -> f64 {
    let speed: Ipm = belt_speed.into();
    safe_div(speed.0 * 60.0, part_pitch_in).max(0.0)
}

/// Capacity margin over a required rate: `capacity / required - 1`.
///
/// `None` when no positive requirement was given.
pub fn throughput_margin(capacity_pph: f64, required_pph: Option<f64>) -> Option<f64> {
    match required_pph {
        Some(required) if required > 0.0 && required.is_finite() => Some(capacity_pph / required - 1.0),
        _ => None,
    }
}
