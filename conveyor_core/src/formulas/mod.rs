//! # Formula Pipeline
//!
//! Pure functions turning a configuration and its parameters into mechanical
//! outputs. The pipeline is total: every input combination produces finite
//! numbers, including physically meaningless ones. Flagging those is the
//! validation engine's job, which lets a caller show derived values next to
//! the errors a user is still fixing.
//!
//! ## Pipeline
//!
//! ```text
//! geometry ──► belt length ──► belt weight ─┐
//! parts/spacing ──► parts on belt ──► load ─┴► total load ──► belt pull
//! belt speed ──► drive shaft rpm ──► gear ratio
//! belt pull ──► torque, horsepower
//! ```
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::formulas::calculate;
//! use conveyor_core::inputs::ConfigurationInput;
//! use conveyor_core::parameters::Parameters;
//! use conveyor_core::vocabulary::ProductKey;
//!
//! let input = ConfigurationInput::baseline();
//! let params = Parameters::for_product(ProductKey::BeltConveyor);
//! let outputs = calculate(&input, &params);
//!
//! assert!(outputs.torque_in_lbf > 0.0);
//! assert!(outputs.gear_ratio > 1.0);
//! ```

pub mod belt;
pub mod drive;
pub mod load;

use serde::{Deserialize, Serialize};

use crate::inputs::ConfigurationInput;
use crate::parameters::Parameters;
use crate::units::{FtLbf, Fpm, Inches, Lbf, Rpm};

/// Division that yields 0 instead of ±∞/NaN for a zero or non-finite
/// denominator.
pub(crate) fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        finite(numerator / denominator)
    }
}

/// Map NaN and ±∞ to 0
pub(crate) fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Mechanical outputs of one calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "belt_length_in": 252.57,
///   "belt_weight_coeff_lb_per_sqft": 0.8,
///   "belt_weight_lbf": 25.26,
///   "parts_on_belt": 10.0,
///   "load_on_belt_lbf": 50.0,
///   "total_load_lbf": 75.26,
///   "friction_pull_lbf": 22.58,
///   "incline_pull_lbf": 0.0,
///   "starting_pull_lbf": 50.0,
///   "belt_pull_lbf": 72.58,
///   "drive_shaft_rpm": 47.75,
///   "torque_in_lbf": 217.73,
///   "torque_ft_lbf": 18.14,
///   "gear_ratio": 36.65,
///   "horsepower_required": 0.165,
///   "capacity_pph": 3000.0,
///   "throughput_margin": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    // === Belt ===
    /// Total open-belt length (in)
    pub belt_length_in: f64,

    /// Belt weight coefficient actually used (lb/ft²)
    pub belt_weight_coeff_lb_per_sqft: f64,

    /// Belt weight (lbf)
    pub belt_weight_lbf: f64,

    // === Load ===
    /// Parts on the carrying run at once
    pub parts_on_belt: f64,

    /// Product load on the belt (lbf)
    pub load_on_belt_lbf: f64,

    /// Belt weight plus product load (lbf)
    pub total_load_lbf: f64,

    // === Belt Pull ===
    /// Friction component (lbf)
    pub friction_pull_lbf: f64,

    /// Incline (gravity) component (lbf)
    pub incline_pull_lbf: f64,

    /// Starting allowance (lbf)
    pub starting_pull_lbf: f64,

    /// Effective belt pull (lbf)
    pub belt_pull_lbf: f64,

    // === Drive ===
    /// Drive shaft speed (rpm)
    pub drive_shaft_rpm: f64,

    /// Drive shaft torque including safety factor (in-lbf)
    pub torque_in_lbf: f64,

    /// Drive shaft torque including safety factor (ft-lbf)
    pub torque_ft_lbf: f64,

    /// Motor rpm / drive shaft rpm
    pub gear_ratio: f64,

    /// Motor horsepower including safety factor
    pub horsepower_required: f64,

    // === Throughput ===
    /// Parts per hour the belt can deliver
    pub capacity_pph: f64,

    /// Capacity over the required rate, minus one; `None` without a requirement
    pub throughput_margin: Option<f64>,
}

/// Run the formula pipeline.
///
/// Takes parameters as given; use [`crate::parameters::effective_parameters`]
/// to fold product defaults and overrides together first.
pub fn calculate(input: &ConfigurationInput, params: &Parameters) -> Outputs {
    // === Belt ===
    let belt_length = belt::total_belt_length(input);
    let coeff = belt::weight_coefficient(input, params);
    let belt_weight = belt::belt_weight(belt_length, Inches(input.belt_width_in), coeff);

    // === Load ===
    let parts = load::parts_on_belt(input);
    let product_load = load::load_on_belt(input, parts);
    let total_load = belt_weight + product_load;
    let pull = load::belt_pull(total_load, product_load, input.incline_deg, params);
    let belt_pull: Lbf = pull.total();

    // === Drive ===
    let belt_speed = Fpm(input.belt_speed_fpm);
    let drive_diameter = Inches(input.drive_pulley_diameter_in);
    let shaft_rpm = drive::drive_shaft_rpm(belt_speed, drive_diameter);
    let torque = drive::drive_torque(belt_pull, drive_diameter, params.safety_factor);
    let torque_ft: FtLbf = torque.into();
    let ratio = drive::gear_ratio(Rpm(params.motor_rpm), shaft_rpm);
    let hp = drive::horsepower(belt_pull, belt_speed, params.safety_factor);

    // === Throughput ===
    let capacity = finite(drive::capacity_pph(belt_speed, input.part_pitch_in()));
    let margin = drive::throughput_margin(capacity, input.required_throughput_pph).map(finite);

    Outputs {
        belt_length_in: finite(belt_length.0),
        belt_weight_coeff_lb_per_sqft: finite(coeff),
        belt_weight_lbf: finite(belt_weight.0),
        parts_on_belt: finite(parts),
        load_on_belt_lbf: finite(product_load.0),
        total_load_lbf: finite(total_load.0),
        friction_pull_lbf: finite(pull.friction.0),
        incline_pull_lbf: finite(pull.incline.0),
        starting_pull_lbf: finite(pull.starting.0),
        belt_pull_lbf: finite(belt_pull.0),
        drive_shaft_rpm: finite(shaft_rpm.0),
        torque_in_lbf: finite(torque.0),
        torque_ft_lbf: finite(torque_ft.0),
        gear_ratio: finite(ratio),
        horsepower_required: finite(hp),
        capacity_pph: capacity,
        throughput_margin: margin,
    }
}

impl Outputs {
    /// Every numeric output, for invariant checks
    pub fn numeric_fields(&self) -> [f64; 16] {
        [
            self.belt_length_in,
            self.belt_weight_coeff_lb_per_sqft,
            self.belt_weight_lbf,
            self.parts_on_belt,
            self.load_on_belt_lbf,
            self.total_load_lbf,
            self.friction_pull_lbf,
            self.incline_pull_lbf,
            self.starting_pull_lbf,
            self.belt_pull_lbf,
            self.drive_shaft_rpm,
            self.torque_in_lbf,
            self.torque_ft_lbf,
            self.gear_ratio,
            self.horsepower_required,
            self.capacity_pph,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::ProductKey;
    use std::f64::consts::PI;

    fn params() -> Parameters {
        Parameters::for_product(ProductKey::BeltConveyor)
    }

    #[test]
    fn test_baseline_outputs() {
        let input = ConfigurationInput::baseline();
        let out = calculate(&input, &params());

        let belt_length = 240.0 + PI * 4.0;
        assert!((out.belt_length_in - belt_length).abs() < 1e-9);

        // (L/12) × (18/12) × 0.8
        let belt_weight = belt_length / 12.0 * 1.5 * 0.8;
        assert!((out.belt_weight_lbf - belt_weight).abs() < 1e-9);

        assert!((out.parts_on_belt - 10.0).abs() < 1e-9);
        assert!((out.load_on_belt_lbf - 50.0).abs() < 1e-9);
        assert!((out.total_load_lbf - (belt_weight + 50.0)).abs() < 1e-9);

        let pull = (belt_weight + 50.0) * 0.3 + 50.0;
        assert!((out.belt_pull_lbf - pull).abs() < 1e-9);

        let rpm = 600.0 / (PI * 4.0);
        assert!((out.drive_shaft_rpm - rpm).abs() < 1e-9);
        assert!((out.torque_in_lbf - pull * 2.0 * 1.5).abs() < 1e-9);
        assert!((out.torque_ft_lbf - pull * 2.0 * 1.5 / 12.0).abs() < 1e-9);
        assert!((out.gear_ratio - 1750.0 / rpm).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let input = ConfigurationInput::baseline();
        let a = serde_json::to_string(&calculate(&input, &params())).unwrap();
        let b = serde_json::to_string(&calculate(&input, &params())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nonsense_inputs_still_finite() {
        let input = ConfigurationInput {
            incline_deg: f64::NAN,
            belt_speed_fpm: -10.0,
            ..ConfigurationInput::default()
        };
        let out = calculate(&input, &params());
        assert!(out.numeric_fields().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_incline_increases_pull() {
        let flat = calculate(&ConfigurationInput::baseline(), &params());
        let mut input = ConfigurationInput::baseline();
        input.incline_deg = 15.0;
        let inclined = calculate(&input, &params());
        assert!(inclined.incline_pull_lbf > 0.0);
        assert!(inclined.belt_pull_lbf > flat.belt_pull_lbf);
    }

    #[test]
    fn test_catalog_coefficient_not_double_converted() {
        let mut input = ConfigurationInput::baseline();
        input.catalog_belt_weight_lb_per_sqft = Some(1.0);
        let out = calculate(&input, &params());
        let expected = out.belt_length_in / 12.0 * (18.0 / 12.0);
        assert!((out.belt_weight_lbf - expected).abs() < 1e-9);
        assert_eq!(out.belt_weight_coeff_lb_per_sqft, 1.0);
    }

    #[test]
    fn test_throughput_margin() {
        let mut input = ConfigurationInput::baseline();
        input.required_throughput_pph = Some(1500.0);
        let out = calculate(&input, &params());
        assert!((out.capacity_pph - 3000.0).abs() < 1e-9);
        assert!((out.throughput_margin.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_result_serialization() {
        let out = calculate(&ConfigurationInput::baseline(), &params());
        let json = serde_json::to_string_pretty(&out).unwrap();
        assert!(json.contains("torque_in_lbf"));
        assert!(json.contains("gear_ratio"));
        let roundtrip: Outputs = serde_json::from_str(&json).unwrap();
        assert!((out.torque_in_lbf - roundtrip.torque_in_lbf).abs() < 1e-9);
    }
}
