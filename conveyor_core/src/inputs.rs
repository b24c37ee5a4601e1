//! # Configuration Input
//!
//! The flat record a caller fills in to describe one conveyor application.
//! It is constructed per calculation request and never mutated during a
//! validate + compute cycle.
//!
//! Fields are grouped the way the configurator form groups them: geometry,
//! speed, product/part, operation, environment, safety, electrical, build
//! options and power-user overrides. All lengths are inches, weights pounds,
//! speeds feet per minute.
//!
//! ## Legacy field names
//!
//! Saved configurations from older form revisions use different key names
//! (for example `conveyor_width_in` before the belt width was renamed).
//! [`normalize`] rewrites those keys to their canonical names on the raw JSON
//! object before deserialization, so no rule ever sees a legacy alias.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "conveyor_length_cc_in": 120.0,
//!   "belt_width_in": 18.0,
//!   "incline_deg": 0.0,
//!   "belt_speed_fpm": 50.0,
//!   "drive_pulley_diameter_in": 4.0,
//!   "tail_pulley_diameter_in": 4.0,
//!   "part_weight_lbs": 5.0,
//!   "part_length_in": 6.0,
//!   "part_width_in": 4.0,
//!   "part_spacing_in": 6.0,
//!   "part_temperature_class": "ambient",
//!   "belt_tracking_method": "crowned"
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CoreError, CoreResult};
use crate::vocabulary::{
    ControlsPackage, DirectionMode, DriveLocation, EndGuards, EnvironmentClass, FluidClass,
    FrameFinish, MountingStyle, PartOrientation, SideLoadSeverity, SupplyPhase, TemperatureClass,
    TrackingMethod,
};

/// Legacy key → canonical key.
///
/// Order matters only for readability; each legacy key maps to exactly one
/// canonical key.
pub const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("conveyor_width_in", "belt_width_in"),
    ("belt_width", "belt_width_in"),
    ("bf", "belt_width_in"),
    ("length_in", "conveyor_length_cc_in"),
    ("conveyor_length_in", "conveyor_length_cc_in"),
    ("speed_fpm", "belt_speed_fpm"),
    ("incline_angle_deg", "incline_deg"),
    ("part_temp_class", "part_temperature_class"),
    ("fluid_type", "fluid_class"),
    ("side_loading", "side_loading_severity"),
];

/// One conveyor application, as entered by the user.
///
/// Missing keys deserialize to the values of [`ConfigurationInput::default`]
/// (zeros for required dimensions), which the structural checks then flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationInput {
    // === Geometry ===
    /// Center-to-center distance between drive and tail pulleys (in)
    pub conveyor_length_cc_in: f64,

    /// Belt width (in)
    pub belt_width_in: f64,

    /// Incline angle from horizontal (degrees)
    pub incline_deg: f64,

    /// Drive pulley diameter (in)
    pub drive_pulley_diameter_in: f64,

    /// Tail pulley diameter (in)
    pub tail_pulley_diameter_in: f64,

    // === Speed ===
    /// Linear belt speed (ft/min)
    pub belt_speed_fpm: f64,

    // === Product / Part ===
    /// Weight of a single part (lb)
    pub part_weight_lbs: f64,

    /// Part length (in)
    pub part_length_in: f64,

    /// Part width (in)
    pub part_width_in: f64,

    /// Gap between consecutive parts along belt travel (in)
    pub part_spacing_in: f64,

    /// Which part dimension runs along belt travel
    pub part_orientation: PartOrientation,

    /// Part temperature when placed on the belt
    pub part_temperature_class: TemperatureClass,

    /// Fluid or contamination carried by the parts
    pub fluid_class: FluidClass,

    /// Height parts fall onto the belt (in)
    pub drop_height_in: f64,

    /// Parts have sharp or burred edges
    pub sharp_edges: bool,

    // === Operation ===
    /// One-way or reversing operation
    pub direction_mode: DirectionMode,

    /// Side-loading severity at the infeed
    pub side_loading_severity: SideLoadSeverity,

    /// Parts accumulate (back up) against a stop on the belt
    pub accumulation: bool,

    /// Start/stop cycle time for indexing applications (s)
    pub cycle_time_s: Option<f64>,

    /// Required throughput (parts per hour)
    pub required_throughput_pph: Option<f64>,

    // === Environment ===
    /// Operating environment
    pub environment_class: EnvironmentClass,

    // === Tracking ===
    /// Belt tracking method
    pub belt_tracking_method: TrackingMethod,

    // === Safety ===
    /// Customer requires a finger-safe conveyor
    pub finger_safe: bool,

    /// End guards at the pulleys
    pub end_guards: EndGuards,

    /// Bottom covers under the return belt
    pub bottom_covers: bool,

    // === Electrical ===
    /// Supply voltage (V)
    pub supply_voltage: f64,

    /// Supply phase
    pub supply_phase: SupplyPhase,

    /// Motor controls package
    pub controls_package: ControlsPackage,

    /// Brake motor requested
    pub brake_motor: bool,

    // === Build Options ===
    /// Drive position along the conveyor
    pub drive_location: DriveLocation,

    /// How the gearmotor mounts to the drive pulley
    pub mounting_style: MountingStyle,

    /// Frame material / finish
    pub frame_finish: FrameFinish,

    /// Cleated belt requested
    pub cleats_enabled: bool,

    /// Cleat height (in)
    pub cleat_height_in: f64,

    /// Catalog key of the selected belt, if any
    pub belt_catalog_key: Option<String>,

    /// Belt weight coefficient from the selected catalog belt (lb/ft²)
    pub catalog_belt_weight_lb_per_sqft: Option<f64>,

    // === Power-User Overrides ===
    /// Override of the bed friction coefficient
    pub friction_coeff_override: Option<f64>,

    /// Override of the torque safety factor
    pub safety_factor_override: Option<f64>,

    /// Override of the belt weight coefficient (lb/ft²)
    pub belt_weight_coeff_override: Option<f64>,

    /// Override of the starting belt pull allowance (lbf)
    pub starting_belt_pull_override_lbf: Option<f64>,
}

impl Default for ConfigurationInput {
    fn default() -> Self {
        ConfigurationInput {
            conveyor_length_cc_in: 0.0,
            belt_width_in: 0.0,
            incline_deg: 0.0,
            drive_pulley_diameter_in: 0.0,
            tail_pulley_diameter_in: 0.0,
            belt_speed_fpm: 0.0,
            part_weight_lbs: 0.0,
            part_length_in: 0.0,
            part_width_in: 0.0,
            part_spacing_in: 0.0,
            part_orientation: PartOrientation::Lengthwise,
            part_temperature_class: TemperatureClass::Ambient,
            fluid_class: FluidClass::None,
            drop_height_in: 0.0,
            sharp_edges: false,
            direction_mode: DirectionMode::OneWay,
            side_loading_severity: SideLoadSeverity::None,
            accumulation: false,
            cycle_time_s: None,
            required_throughput_pph: None,
            environment_class: EnvironmentClass::Indoor,
            belt_tracking_method: TrackingMethod::Crowned,
            finger_safe: false,
            end_guards: EndGuards::None,
            bottom_covers: false,
            supply_voltage: 460.0,
            supply_phase: SupplyPhase::Three,
            controls_package: ControlsPackage::None,
            brake_motor: false,
            drive_location: DriveLocation::Head,
            mounting_style: MountingStyle::ShaftMounted,
            frame_finish: FrameFinish::PaintedSteel,
            cleats_enabled: false,
            cleat_height_in: 0.0,
            belt_catalog_key: None,
            catalog_belt_weight_lb_per_sqft: None,
            friction_coeff_override: None,
            safety_factor_override: None,
            belt_weight_coeff_override: None,
            starting_belt_pull_override_lbf: None,
        }
    }
}

impl ConfigurationInput {
    /// A clean, ordinary application: 120" C-C, 18" belt, flat, ambient
    /// parts, no side loading. Produces no findings from the domain rules.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conveyor_core::inputs::ConfigurationInput;
    ///
    /// let input = ConfigurationInput::baseline();
    /// assert_eq!(input.conveyor_length_cc_in, 120.0);
    /// ```
    pub fn baseline() -> Self {
        ConfigurationInput {
            conveyor_length_cc_in: 120.0,
            belt_width_in: 18.0,
            incline_deg: 0.0,
            drive_pulley_diameter_in: 4.0,
            tail_pulley_diameter_in: 4.0,
            belt_speed_fpm: 50.0,
            part_weight_lbs: 5.0,
            part_length_in: 6.0,
            part_width_in: 4.0,
            part_spacing_in: 6.0,
            ..ConfigurationInput::default()
        }
    }

    /// Part dimension that runs along belt travel (in)
    pub fn travel_dimension_in(&self) -> f64 {
        match self.part_orientation {
            PartOrientation::Lengthwise => self.part_length_in,
            PartOrientation::Crosswise => self.part_width_in,
        }
    }

    /// Belt length consumed by one part plus its gap (in)
    pub fn part_pitch_in(&self) -> f64 {
        self.travel_dimension_in() + self.part_spacing_in
    }

    /// Conveyor length to belt width ratio
    ///
    /// Returns 0 when the width is not positive.
    pub fn length_to_width_ratio(&self) -> f64 {
        if self.belt_width_in > 0.0 && self.belt_width_in.is_finite() {
            self.conveyor_length_cc_in / self.belt_width_in
        } else {
            0.0
        }
    }
}

/// Rewrite legacy keys of a raw configuration object to canonical keys.
///
/// When both a legacy key and its canonical key are present, the canonical
/// value wins and the legacy key is dropped.
pub fn normalize_aliases(raw: &Value) -> CoreResult<Value> {
    let object = raw
        .as_object()
        .ok_or_else(|| CoreError::malformed_input("$", "configuration must be a JSON object"))?;

    let mut normalized = object.clone();
    for (legacy, canonical) in LEGACY_ALIASES {
        if let Some(value) = normalized.remove(*legacy) {
            if !normalized.contains_key(*canonical) {
                tracing::debug!(legacy, canonical, "normalized legacy configuration key");
                normalized.insert((*canonical).to_string(), value);
            }
        }
    }
    Ok(Value::Object(normalized))
}

/// Normalize legacy aliases and deserialize into a [`ConfigurationInput`].
///
/// # Errors
///
/// [`CoreError::MalformedInput`] when the value is not an object or a field
/// has the wrong type / an unknown enumeration code.
///
/// # Example
///
/// ```rust
/// use conveyor_core::inputs::normalize;
/// use serde_json::json;
///
/// let input = normalize(&json!({ "conveyor_width_in": 24.0 })).unwrap();
/// assert_eq!(input.belt_width_in, 24.0);
/// ```
pub fn normalize(raw: &Value) -> CoreResult<ConfigurationInput> {
    let canonical = normalize_aliases(raw)?;
    serde_json::from_value(canonical).map_err(|e| CoreError::malformed_input("$", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_width_alias() {
        let input = normalize(&json!({ "conveyor_width_in": 24.0 })).unwrap();
        assert_eq!(input.belt_width_in, 24.0);

        let input = normalize(&json!({ "bf": 30.0 })).unwrap();
        assert_eq!(input.belt_width_in, 30.0);
    }

    #[test]
    fn test_legacy_fluid_alias() {
        let value = normalize_aliases(&json!({ "fluid_type": "considerable" })).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("fluid_type"));
        assert_eq!(object["fluid_class"], json!("considerable"));
    }

    #[test]
    fn test_canonical_key_wins() {
        let input = normalize(&json!({
            "belt_width_in": 18.0,
            "conveyor_width_in": 24.0
        }))
        .unwrap();
        assert_eq!(input.belt_width_in, 18.0);
    }

    #[test]
    fn test_alias_removed_from_normalized_object() {
        let value = normalize_aliases(&json!({ "speed_fpm": 65.0 })).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("speed_fpm"));
        assert_eq!(object["belt_speed_fpm"], json!(65.0));
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = normalize(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_INPUT");
    }

    #[test]
    fn test_unknown_enum_code_is_malformed() {
        let err = normalize(&json!({ "part_temperature_class": "molten" })).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_INPUT");
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let input = normalize(&json!({})).unwrap();
        assert_eq!(input.conveyor_length_cc_in, 0.0);
        assert_eq!(input.belt_tracking_method, TrackingMethod::Crowned);
    }

    #[test]
    fn test_travel_dimension_follows_orientation() {
        let mut input = ConfigurationInput::baseline();
        assert_eq!(input.travel_dimension_in(), 6.0);
        input.part_orientation = PartOrientation::Crosswise;
        assert_eq!(input.travel_dimension_in(), 4.0);
        assert_eq!(input.part_pitch_in(), 10.0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = ConfigurationInput::baseline();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: ConfigurationInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
