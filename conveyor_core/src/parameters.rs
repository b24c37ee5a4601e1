//! # Calculation Parameters
//!
//! Tunable physical constants used by the formula pipeline. Each product
//! family has a static default record; callers may override any subset of
//! fields per request.
//!
//! Precedence, lowest to highest:
//!
//! 1. [`Parameters::for_product`] static defaults
//! 2. caller [`ParameterOverrides`]
//! 3. power-user overrides carried on the [`ConfigurationInput`]
//!
//! Merging is field-by-field and always produces a new value; nothing is
//! mutated in place.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::parameters::{ParameterOverrides, Parameters};
//! use conveyor_core::vocabulary::ProductKey;
//!
//! let overrides = ParameterOverrides {
//!     safety_factor: Some(2.0),
//!     ..Default::default()
//! };
//! let params = Parameters::for_product(ProductKey::BeltConveyor).with_overrides(&overrides);
//! assert_eq!(params.safety_factor, 2.0);
//! assert_eq!(params.motor_rpm, 1750.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::inputs::ConfigurationInput;
use crate::vocabulary::ProductKey;

/// Physical constants for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Belt-to-bed friction coefficient (μ)
    pub friction_coeff: f64,

    /// Multiplier applied to running torque and horsepower
    pub safety_factor: f64,

    /// Motor base speed (rpm)
    pub motor_rpm: f64,

    /// Gravity relative to standard gravity (1.0 = 1 g)
    pub gravity_g: f64,

    /// Fixed allowance added to belt pull for starting under load (lbf)
    pub starting_belt_pull_lbf: f64,

    /// Belt weight coefficient used when no belt is selected (lb/ft²)
    pub belt_weight_lb_per_sqft: f64,
}

/// Partial override of [`Parameters`]; `None` keeps the underlying value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterOverrides {
    pub friction_coeff: Option<f64>,
    pub safety_factor: Option<f64>,
    pub motor_rpm: Option<f64>,
    pub gravity_g: Option<f64>,
    pub starting_belt_pull_lbf: Option<f64>,
    pub belt_weight_lb_per_sqft: Option<f64>,
}

static PRODUCT_DEFAULTS: Lazy<HashMap<ProductKey, Parameters>> = Lazy::new(|| {
    let mut defaults = HashMap::new();
    defaults.insert(
        ProductKey::BeltConveyor,
        Parameters {
            friction_coeff: 0.3,
            safety_factor: 1.5,
            motor_rpm: 1750.0,
            gravity_g: 1.0,
            starting_belt_pull_lbf: 50.0,
            belt_weight_lb_per_sqft: 0.8,
        },
    );
    defaults.insert(
        ProductKey::SliderBed,
        Parameters {
            friction_coeff: 0.4,
            safety_factor: 1.5,
            motor_rpm: 1750.0,
            gravity_g: 1.0,
            starting_belt_pull_lbf: 25.0,
            belt_weight_lb_per_sqft: 0.6,
        },
    );
    defaults.insert(
        ProductKey::SanitaryBelt,
        Parameters {
            friction_coeff: 0.35,
            safety_factor: 2.0,
            motor_rpm: 1750.0,
            gravity_g: 1.0,
            starting_belt_pull_lbf: 50.0,
            belt_weight_lb_per_sqft: 1.2,
        },
    );
    defaults
});

impl Parameters {
    /// Static defaults for a product family.
    pub fn for_product(product: ProductKey) -> Parameters {
        PRODUCT_DEFAULTS
            .get(&product)
            .copied()
            .unwrap_or_else(Parameters::generic)
    }

    /// Product-neutral defaults
    pub fn generic() -> Parameters {
        Parameters {
            friction_coeff: 0.3,
            safety_factor: 1.5,
            motor_rpm: 1750.0,
            gravity_g: 1.0,
            starting_belt_pull_lbf: 50.0,
            belt_weight_lb_per_sqft: 0.8,
        }
    }

    /// Merge caller overrides on top of these parameters.
    pub fn with_overrides(&self, overrides: &ParameterOverrides) -> Parameters {
        Parameters {
            friction_coeff: overrides.friction_coeff.unwrap_or(self.friction_coeff),
            safety_factor: overrides.safety_factor.unwrap_or(self.safety_factor),
            motor_rpm: overrides.motor_rpm.unwrap_or(self.motor_rpm),
            gravity_g: overrides.gravity_g.unwrap_or(self.gravity_g),
            starting_belt_pull_lbf: overrides
                .starting_belt_pull_lbf
                .unwrap_or(self.starting_belt_pull_lbf),
            belt_weight_lb_per_sqft: overrides
                .belt_weight_lb_per_sqft
                .unwrap_or(self.belt_weight_lb_per_sqft),
        }
    }

    /// Apply the power-user overrides carried on a configuration.
    ///
    /// The belt weight coefficient is not touched here: it is resolved once,
    /// in [`crate::formulas::belt::weight_coefficient`], because the catalog
    /// belt sits between the input override and this default.
    pub fn with_input_overrides(&self, input: &ConfigurationInput) -> Parameters {
        self.with_overrides(&ParameterOverrides {
            friction_coeff: input.friction_coeff_override,
            safety_factor: input.safety_factor_override,
            starting_belt_pull_lbf: input.starting_belt_pull_override_lbf,
            ..ParameterOverrides::default()
        })
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters::generic()
    }
}

/// Effective parameters for one request: product defaults, then caller
/// overrides, then the configuration's own power-user overrides.
pub fn effective_parameters(
    product: ProductKey,
    overrides: &ParameterOverrides,
    input: &ConfigurationInput,
) -> Parameters {
    Parameters::for_product(product)
        .with_overrides(overrides)
        .with_input_overrides(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_product_has_defaults() {
        for product in ProductKey::ALL {
            let params = Parameters::for_product(*product);
            assert!(params.motor_rpm > 0.0);
            assert!(params.safety_factor >= 1.0);
        }
    }

    #[test]
    fn test_partial_override_keeps_other_fields() {
        let base = Parameters::for_product(ProductKey::SliderBed);
        let merged = base.with_overrides(&ParameterOverrides {
            friction_coeff: Some(0.25),
            ..Default::default()
        });
        assert_eq!(merged.friction_coeff, 0.25);
        assert_eq!(merged.safety_factor, base.safety_factor);
        assert_eq!(merged.motor_rpm, base.motor_rpm);
        assert_eq!(merged.starting_belt_pull_lbf, base.starting_belt_pull_lbf);
    }

    #[test]
    fn test_merge_does_not_mutate_defaults() {
        let _ = Parameters::for_product(ProductKey::BeltConveyor).with_overrides(&ParameterOverrides {
            motor_rpm: Some(3450.0),
            ..Default::default()
        });
        assert_eq!(Parameters::for_product(ProductKey::BeltConveyor).motor_rpm, 1750.0);
    }

    #[test]
    fn test_input_overrides_win_over_caller_overrides() {
        let mut input = ConfigurationInput::baseline();
        input.safety_factor_override = Some(3.0);
        let params = effective_parameters(
            ProductKey::BeltConveyor,
            &ParameterOverrides {
                safety_factor: Some(2.0),
                friction_coeff: Some(0.2),
                ..Default::default()
            },
            &input,
        );
        assert_eq!(params.safety_factor, 3.0);
        assert_eq!(params.friction_coeff, 0.2);
    }

    #[test]
    fn test_overrides_deserialize_partially() {
        let overrides: ParameterOverrides =
            serde_json::from_str(r#"{ "motor_rpm": 1150.0 }"#).unwrap();
        assert_eq!(overrides.motor_rpm, Some(1150.0));
        assert_eq!(overrides.safety_factor, None);
    }
}
