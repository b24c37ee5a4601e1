//! Load on the belt and the resulting belt pull.

use crate::formulas::safe_div;
use crate::inputs::ConfigurationInput;
use crate::parameters::Parameters;
use crate::units::Lbf;

/// Number of parts on the carrying run at once.
///
/// The carrying run is the center-to-center length; each part occupies its
/// travel dimension plus the spacing gap. Fractional parts are kept so the
/// load figure is continuous in the inputs.
pub fn parts_on_belt(input: &ConfigurationInput) -> f64 {
    safe_div(input.conveyor_length_cc_in, input.part_pitch_in()).max(0.0)
}

/// Product load carried by the belt
pub fn load_on_belt(input: &ConfigurationInput, parts: f64) -> Lbf {
    Lbf(parts * input.part_weight_lbs)
}

/// Components of the effective belt pull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeltPull {
    /// Friction between belt and bed (lbf)
    pub friction: Lbf,
    /// Gravity component of the product load along the incline (lbf)
    pub incline: Lbf,
    /// Fixed starting allowance (lbf)
    pub starting: Lbf,
}

impl BeltPull {
    /// Total effective belt pull
    pub fn total(&self) -> Lbf {
        self.friction + self.incline + self.starting
    }
}

/// Belt pull for a total load and a product load on an incline.
///
/// - friction = total load × μ × cos θ
/// - incline = product load × g × sin θ
/// - plus the starting allowance
pub fn belt_pull(total_load: Lbf, product_load: Lbf, incline_deg: f64, params: &Parameters) -> BeltPull {
    let theta = incline_deg.to_radians();
    BeltPull {
        friction: total_load * (params.friction_coeff * theta.cos()),
        incline: product_load * (params.gravity_g * theta.sin()),
        starting: Lbf(params.starting_belt_pull_lbf),
    }
}
