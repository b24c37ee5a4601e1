//! Structural checks.
//!
//! Each check is a row in a table: field name, label, accessor and valid
//! range. Rows are independent and evaluated in table order; every failing
//! row contributes one blocking error. Optional fields whose accessor
//! returns `None` are skipped. Non-finite values fail every range.

use crate::inputs::ConfigurationInput;
use crate::parameters::Parameters;
use crate::validation::ValidationMessage;

/// Valid range for a numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidRange {
    /// value > 0
    Positive,
    /// value >= 0
    NonNegative,
    /// min <= value <= max
    Between(f64, f64),
}

impl ValidRange {
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match *self {
            ValidRange::Positive => value > 0.0,
            ValidRange::NonNegative => value >= 0.0,
            ValidRange::Between(min, max) => value >= min && value <= max,
        }
    }

    fn describe(&self) -> String {
        match *self {
            ValidRange::Positive => "must be greater than 0".to_string(),
            ValidRange::NonNegative => "must be 0 or greater".to_string(),
            ValidRange::Between(min, max) => format!("must be between {} and {}", min, max),
        }
    }
}

struct RangeCheck<T> {
    field: &'static str,
    label: &'static str,
    value: fn(&T) -> Option<f64>,
    range: ValidRange,
}

impl<T> RangeCheck<T> {
    fn evaluate(&self, subject: &T) -> Option<ValidationMessage> {
        let value = (self.value)(subject)?;
        if self.range.contains(value) {
            return None;
        }
        Some(ValidationMessage::error(
            self.field,
            format!("{} {} (got {})", self.label, self.range.describe(), value),
        ))
    }
}

const INPUT_CHECKS: &[RangeCheck<ConfigurationInput>] = &[
    // === Geometry ===
    RangeCheck {
        field: "conveyor_length_cc_in",
        label: "Conveyor length (C-C)",
        value: |i| Some(i.conveyor_length_cc_in),
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "belt_width_in",
        label: "Belt width",
        value: |i| Some(i.belt_width_in),
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "incline_deg",
        label: "Incline angle",
        value: |i| Some(i.incline_deg),
        range: ValidRange::Between(0.0, 90.0),
    },
    RangeCheck {
        field: "drive_pulley_diameter_in",
        label: "Drive pulley diameter",
        value: |i| Some(i.drive_pulley_diameter_in),
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "tail_pulley_diameter_in",
        label: "Tail pulley diameter",
        value: |i| Some(i.tail_pulley_diameter_in),
        range: ValidRange::Positive,
    },
    // === Speed ===
    RangeCheck {
        field: "belt_speed_fpm",
        label: "Belt speed",
        value: |i| Some(i.belt_speed_fpm),
        range: ValidRange::Positive,
    },
    // === Part ===
    RangeCheck {
        field: "part_weight_lbs",
        label: "Part weight",
        value: |i| Some(i.part_weight_lbs),
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "part_length_in",
        label: "Part length",
        value: |i| Some(i.part_length_in),
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "part_width_in",
        label: "Part width",
        value: |i| Some(i.part_width_in),
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "part_spacing_in",
        label: "Part spacing",
        value: |i| Some(i.part_spacing_in),
        range: ValidRange::NonNegative,
    },
    RangeCheck {
        field: "drop_height_in",
        label: "Drop height",
        value: |i| Some(i.drop_height_in),
        range: ValidRange::NonNegative,
    },
    // === Operation ===
    RangeCheck {
        field: "cycle_time_s",
        label: "Cycle time",
        value: |i| i.cycle_time_s,
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "required_throughput_pph",
        label: "Required throughput",
        value: |i| i.required_throughput_pph,
        range: ValidRange::NonNegative,
    },
    // === Electrical ===
    RangeCheck {
        field: "supply_voltage",
        label: "Supply voltage",
        value: |i| Some(i.supply_voltage),
        range: ValidRange::Between(100.0, 600.0),
    },
    // === Build ===
    RangeCheck {
        field: "cleat_height_in",
        label: "Cleat height",
        value: |i| Some(i.cleat_height_in),
        range: ValidRange::NonNegative,
    },
    RangeCheck {
        field: "catalog_belt_weight_lb_per_sqft",
        label: "Catalog belt weight",
        value: |i| i.catalog_belt_weight_lb_per_sqft,
        range: ValidRange::Positive,
    },
    // === Power-User Overrides ===
    RangeCheck {
        field: "friction_coeff_override",
        label: "Friction coefficient override",
        value: |i| i.friction_coeff_override,
        range: ValidRange::Between(0.05, 0.6),
    },
    RangeCheck {
        field: "safety_factor_override",
        label: "Safety factor override",
        value: |i| i.safety_factor_override,
        range: ValidRange::Between(1.0, 5.0),
    },
    RangeCheck {
        field: "belt_weight_coeff_override",
        label: "Belt weight coefficient override",
        value: |i| i.belt_weight_coeff_override,
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "starting_belt_pull_override_lbf",
        label: "Starting belt pull override",
        value: |i| i.starting_belt_pull_override_lbf,
        range: ValidRange::NonNegative,
    },
];

const PARAMETER_CHECKS: &[RangeCheck<Parameters>] = &[
    RangeCheck {
        field: "friction_coeff",
        label: "Friction coefficient",
        value: |p| Some(p.friction_coeff),
        range: ValidRange::Between(0.05, 0.6),
    },
    RangeCheck {
        field: "safety_factor",
        label: "Safety factor",
        value: |p| Some(p.safety_factor),
        range: ValidRange::Between(1.0, 5.0),
    },
    RangeCheck {
        field: "motor_rpm",
        label: "Motor RPM",
        value: |p| Some(p.motor_rpm),
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "gravity_g",
        label: "Gravity",
        value: |p| Some(p.gravity_g),
        range: ValidRange::Positive,
    },
    RangeCheck {
        field: "starting_belt_pull_lbf",
        label: "Starting belt pull",
        value: |p| Some(p.starting_belt_pull_lbf),
        range: ValidRange::NonNegative,
    },
    RangeCheck {
        field: "belt_weight_lb_per_sqft",
        label: "Belt weight coefficient",
        value: |p| Some(p.belt_weight_lb_per_sqft),
        range: ValidRange::Positive,
    },
];

/// Range checks on the configuration input.
pub fn validate_structural(input: &ConfigurationInput) -> Vec<ValidationMessage> {
    INPUT_CHECKS.iter().filter_map(|check| check.evaluate(input)).collect()
}

/// Parameter fields a configuration can override directly
const INPUT_OVERRIDES: &[(&str, fn(&ConfigurationInput) -> Option<f64>)] = &[
    ("friction_coeff", |i| i.friction_coeff_override),
    ("safety_factor", |i| i.safety_factor_override),
    ("starting_belt_pull_lbf", |i| i.starting_belt_pull_override_lbf),
];

/// Range checks on the effective parameters.
pub fn validate_parameters(params: &Parameters) -> Vec<ValidationMessage> {
    PARAMETER_CHECKS.iter().filter_map(|check| check.evaluate(params)).collect()
}

/// Range checks on parameters that already carry `input`'s overrides.
///
/// Fields the configuration overrides are skipped; the override itself is
/// range-checked by [`validate_structural`].
pub fn validate_effective_parameters(params: &Parameters, input: &ConfigurationInput) -> Vec<ValidationMessage> {
    let overridden = |field: &str| {
        INPUT_OVERRIDES
            .iter()
            .any(|(name, value)| *name == field && value(input).is_some())
    };
    PARAMETER_CHECKS
        .iter()
        .filter(|check| !overridden(check.field))
        .filter_map(|check| check.evaluate(params))
        .collect()
}
