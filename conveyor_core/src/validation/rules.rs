//! Application (domain) rules.
//!
//! Rules live in [`DOMAIN_RULES`], a table evaluated in order. Each rule
//! declares the product capabilities it requires; [`apply_domain_rules`]
//! drops rules the active product does not support before evaluating any of
//! them. Rule bodies never branch on the product: the product only supplies
//! the display name used in message text through [`RuleContext`].
//!
//! ## Incline bands
//!
//! | incline θ          | finding                         |
//! |--------------------|---------------------------------|
//! | 0° ≤ θ ≤ 20°       | none                            |
//! | 20° < θ ≤ 35°      | warning (moderate incline)      |
//! | 35° < θ ≤ 45°      | warning (steep incline)         |
//! | θ > 45°            | blocking error                  |
//!
//! Lower bounds are exclusive, upper bounds inclusive, and exactly one band
//! applies.

use crate::inputs::ConfigurationInput;
use crate::tracking::{self, RiskLevel};
use crate::validation::{ValidationMessage, ValidationReport};
use crate::vocabulary::{
    Capability, DirectionMode, EnvironmentClass, FluidClass, FrameFinish, ProductKey,
    SideLoadSeverity, SupplyPhase, TemperatureClass, TrackingMethod,
};

/// Upper bound of the no-issue incline band (degrees)
pub const INCLINE_MODERATE_DEG: f64 = 20.0;
/// Upper bound of the moderate incline band (degrees)
pub const INCLINE_STEEP_DEG: f64 = 35.0;
/// Maximum supported incline (degrees)
pub const INCLINE_MAX_DEG: f64 = 45.0;

/// Center-to-center length above which a long-conveyor advisory fires (in)
pub const LONG_CONVEYOR_IN: f64 = 600.0;
/// Drop height above which impact is a warning (in)
pub const DROP_HEIGHT_WARN_IN: f64 = 24.0;
/// Drop height above which impact is noted (in)
pub const DROP_HEIGHT_NOTE_IN: f64 = 12.0;
/// Minimum cleat height on a moderate or steeper incline (in)
pub const MIN_CLEAT_HEIGHT_ON_INCLINE_IN: f64 = 1.0;

/// Per-invocation context handed to every rule
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    /// Product name rendered into messages
    pub product_name: &'static str,
}

impl RuleContext {
    pub fn for_product(product: Option<ProductKey>) -> Self {
        RuleContext {
            product_name: product.map_or("conveyor", |p| p.display_name()),
        }
    }
}

/// One application rule
pub struct DomainRule {
    /// Stable identifier
    pub id: &'static str,
    /// Capabilities the product must offer for this rule to apply
    pub requires: &'static [Capability],
    /// Evaluate and push findings
    pub evaluate: fn(&ConfigurationInput, &RuleContext, &mut Vec<ValidationMessage>),
}

impl DomainRule {
    /// Whether this rule applies to the given product.
    ///
    /// With no product, only ungated rules apply.
    pub fn applies_to(&self, product: Option<ProductKey>) -> bool {
        match product {
            Some(p) => p.supports_all(self.requires),
            None => !self.is_product_gated(),
        }
    }

    pub fn is_product_gated(&self) -> bool {
        !self.requires.is_empty()
    }
}

/// Every domain rule, in evaluation order
pub const DOMAIN_RULES: &[DomainRule] = &[
    DomainRule {
        id: "incline_band",
        requires: &[],
        evaluate: incline_band,
    },
    DomainRule {
        id: "part_temperature",
        requires: &[],
        evaluate: part_temperature,
    },
    DomainRule {
        id: "fluid_contamination",
        requires: &[],
        evaluate: fluid_contamination,
    },
    DomainRule {
        id: "finger_safety",
        requires: &[],
        evaluate: finger_safety,
    },
    DomainRule {
        id: "side_loading",
        requires: &[],
        evaluate: side_loading,
    },
    DomainRule {
        id: "long_conveyor",
        requires: &[],
        evaluate: long_conveyor,
    },
    DomainRule {
        id: "drop_height",
        requires: &[],
        evaluate: drop_height,
    },
    DomainRule {
        id: "sharp_edges",
        requires: &[],
        evaluate: sharp_edges,
    },
    DomainRule {
        id: "tracking_risk",
        requires: &[],
        evaluate: tracking_risk,
    },
    DomainRule {
        id: "reversing_controls",
        requires: &[],
        evaluate: reversing_controls,
    },
    DomainRule {
        id: "brake_single_phase",
        requires: &[],
        evaluate: brake_single_phase,
    },
    DomainRule {
        id: "cleat_height_on_incline",
        requires: &[Capability::Cleats],
        evaluate: cleat_height_on_incline,
    },
    DomainRule {
        id: "washdown_frame",
        requires: &[Capability::PremiumBuild],
        evaluate: washdown_frame,
    },
];

/// Evaluate every applicable domain rule.
pub fn apply_domain_rules(input: &ConfigurationInput, product: Option<ProductKey>) -> ValidationReport {
    let ctx = RuleContext::for_product(product);
    let mut messages = Vec::new();
    for rule in DOMAIN_RULES.iter().filter(|r| r.applies_to(product)) {
        (rule.evaluate)(input, &ctx, &mut messages);
    }
    ValidationReport::from_messages(messages)
}

// ============================================================================
// Geometry
// ============================================================================

fn incline_band(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    let theta = input.incline_deg;
    let field = "incline_deg";
    if theta > INCLINE_MAX_DEG {
        out.push(ValidationMessage::error(
            field,
            format!(
                "Incline of {:.1}° exceeds the {:.0}° maximum for a {}",
                theta, INCLINE_MAX_DEG, ctx.product_name
            ),
        ));
    } else if theta > INCLINE_STEEP_DEG {
        out.push(ValidationMessage::warning(
            field,
            format!(
                "Steep incline of {:.1}° (over {:.0}°): {} requires cleats and product testing",
                theta, INCLINE_STEEP_DEG, ctx.product_name
            ),
        ));
    } else if theta > INCLINE_MODERATE_DEG {
        out.push(ValidationMessage::warning(
            field,
            format!(
                "Incline of {:.1}° (over {:.0}°): parts may slip on a {}; consider cleats or a high-friction belt",
                theta, INCLINE_MODERATE_DEG, ctx.product_name
            ),
        ));
    }
}

fn long_conveyor(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    if input.conveyor_length_cc_in > LONG_CONVEYOR_IN {
        out.push(ValidationMessage::warning(
            "conveyor_length_cc_in",
            format!(
                "{:.0}\" C-C is a long {}; review take-up travel and consider a center drive",
                input.conveyor_length_cc_in, ctx.product_name
            ),
        ));
    }
}

// ============================================================================
// Product / Part
// ============================================================================

fn part_temperature(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    let field = "part_temperature_class";
    match input.part_temperature_class {
        TemperatureClass::RedHot => out.push(ValidationMessage::error(
            field,
            format!("Red-hot parts cannot be conveyed on a {} belt", ctx.product_name),
        )),
        TemperatureClass::Hot => out.push(ValidationMessage::warning(
            field,
            format!("Hot parts require a high-temperature belt on the {}", ctx.product_name),
        )),
        TemperatureClass::Ambient | TemperatureClass::Warm => {}
    }
}

fn fluid_contamination(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    let field = "fluid_class";
    match input.fluid_class {
        FluidClass::Considerable => out.push(ValidationMessage::warning(
            field,
            format!(
                "Considerable fluid on parts: select an oil- and water-resistant belt for the {}",
                ctx.product_name
            ),
        )),
        FluidClass::Minimal => out.push(ValidationMessage::info(
            field,
            "Minimal fluid on parts: standard belts are acceptable",
        )),
        FluidClass::None => {}
    }
}

fn drop_height(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    let height = input.drop_height_in;
    let field = "drop_height_in";
    if height > DROP_HEIGHT_WARN_IN {
        out.push(ValidationMessage::warning(
            field,
            format!(
                "Parts dropped {:.0}\" onto the {} belt: add an impact bed or reduce the drop",
                height, ctx.product_name
            ),
        ));
    } else if height > DROP_HEIGHT_NOTE_IN {
        out.push(ValidationMessage::info(
            field,
            format!("Drop height of {:.0}\" may wear the belt over time", height),
        ));
    }
}

fn sharp_edges(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    if input.sharp_edges {
        out.push(ValidationMessage::warning(
            "sharp_edges",
            format!("Sharp-edged parts: specify a cut-resistant belt for the {}", ctx.product_name),
        ));
    }
}

// ============================================================================
// Safety
// ============================================================================

fn finger_safety(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    if !input.finger_safe {
        return;
    }
    let mut missing = Vec::new();
    if !input.end_guards.covers_both_ends() {
        missing.push("end guards at both pulleys");
    }
    if !input.bottom_covers {
        missing.push("bottom covers");
    }
    if !missing.is_empty() {
        out.push(ValidationMessage::warning(
            "finger_safe",
            format!(
                "Finger-safe {} requested without {}",
                ctx.product_name,
                missing.join(" and ")
            ),
        ));
    }
}

// ============================================================================
// Operation / Tracking
// ============================================================================

fn side_loading(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    if input.belt_tracking_method == TrackingMethod::VGuided {
        return;
    }
    let field = "side_loading_severity";
    match input.side_loading_severity {
        SideLoadSeverity::Heavy | SideLoadSeverity::Moderate => out.push(ValidationMessage::warning(
            field,
            format!(
                "{} side loading without a V-guide will push the {} belt off track",
                input.side_loading_severity.display_name(),
                ctx.product_name
            ),
        )),
        SideLoadSeverity::Light => out.push(ValidationMessage::info(
            field,
            "Light side loading: monitor belt tracking after installation",
        )),
        SideLoadSeverity::None => {}
    }
}

fn tracking_risk(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    if input.belt_tracking_method != TrackingMethod::Crowned {
        return;
    }
    let assessment = tracking::assess(input);
    if assessment.risk_level < RiskLevel::Medium {
        return;
    }
    let mut message = format!(
        "Tracking risk is {} for this {}; {} tracking is recommended",
        assessment.risk_level,
        ctx.product_name,
        assessment.recommendation.display_name()
    );
    if !assessment.warnings.is_empty() {
        message.push_str(&format!(" ({})", assessment.warnings.join("; ")));
    }
    out.push(ValidationMessage::warning("belt_tracking_method", message));
}

// ============================================================================
// Electrical
// ============================================================================

fn reversing_controls(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    if input.direction_mode == DirectionMode::Reversing && !input.controls_package.supports_reversing() {
        out.push(ValidationMessage::warning(
            "controls_package",
            format!(
                "Reversing {} needs a reversing starter or VFD (selected: {})",
                ctx.product_name,
                input.controls_package.display_name()
            ),
        ));
    }
}

fn brake_single_phase(input: &ConfigurationInput, _ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    if input.brake_motor && input.supply_phase == SupplyPhase::Single {
        out.push(ValidationMessage::info(
            "brake_motor",
            "Brake motors on single-phase supply have limited frame availability",
        ));
    }
}

// ============================================================================
// Product-Gated
// ============================================================================

fn cleat_height_on_incline(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    if input.cleats_enabled
        && input.incline_deg > INCLINE_MODERATE_DEG
        && input.cleat_height_in < MIN_CLEAT_HEIGHT_ON_INCLINE_IN
    {
        out.push(ValidationMessage::warning(
            "cleat_height_in",
            format!(
                "Cleats under {:.0}\" will not hold parts on a {:.0}° {}",
                MIN_CLEAT_HEIGHT_ON_INCLINE_IN, input.incline_deg, ctx.product_name
            ),
        ));
    }
}

fn washdown_frame(input: &ConfigurationInput, ctx: &RuleContext, out: &mut Vec<ValidationMessage>) {
    if input.environment_class == EnvironmentClass::Washdown
        && input.frame_finish != FrameFinish::StainlessSteel
    {
        out.push(ValidationMessage::warning(
            "frame_finish",
            format!(
                "Washdown {} should use a stainless steel frame (selected: {})",
                ctx.product_name,
                input.frame_finish.display_name()
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Severity;
    use crate::vocabulary::{ControlsPackage, EndGuards};

    fn incline_findings(theta: f64) -> ValidationReport {
        let mut input = ConfigurationInput::baseline();
        input.incline_deg = theta;
        let mut messages = Vec::new();
        incline_band(&input, &RuleContext::for_product(None), &mut messages);
        ValidationReport::from_messages(messages)
    }

    #[test]
    fn test_clean_configuration_has_no_findings() {
        for product in ProductKey::ALL {
            let report = apply_domain_rules(&ConfigurationInput::baseline(), Some(*product));
            assert!(report.errors.is_empty(), "{}: {:?}", product, report.errors);
            assert!(report.warnings.is_empty(), "{}: {:?}", product, report.warnings);
        }
    }

    #[test]
    fn test_incline_band_boundaries() {
        // (theta, errors, warnings, message fragment)
        let cases = [
            (0.0, 0, 0, None),
            (20.0, 0, 0, None),
            (20.0001, 0, 1, Some("over 20°")),
            (35.0, 0, 1, Some("over 20°")),
            (35.0001, 0, 1, Some("over 35°")),
            (45.0, 0, 1, Some("over 35°")),
            (45.0001, 1, 0, Some("45° maximum")),
        ];
        for (theta, errors, warnings, fragment) in cases {
            let report = incline_findings(theta);
            assert_eq!(report.errors.len(), errors, "errors at {}", theta);
            assert_eq!(report.warnings.len(), warnings, "warnings at {}", theta);
            if let Some(fragment) = fragment {
                let all: Vec<_> = report.errors.iter().chain(report.warnings.iter()).collect();
                assert!(all[0].message.contains(fragment), "{} at {}", all[0].message, theta);
            }
        }
    }

    #[test]
    fn test_incline_46_single_error() {
        let mut input = ConfigurationInput::baseline();
        input.incline_deg = 46.0;
        let report = apply_domain_rules(&input, Some(ProductKey::BeltConveyor));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "incline_deg");
        assert!(report.errors[0].message.contains("45°"));
        assert!(report.warnings.iter().all(|w| w.field != "incline_deg"));
    }

    #[test]
    fn test_red_hot_is_error_hot_is_warning() {
        let mut input = ConfigurationInput::baseline();
        input.part_temperature_class = TemperatureClass::RedHot;
        let report = apply_domain_rules(&input, Some(ProductKey::BeltConveyor));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "part_temperature_class");

        input.part_temperature_class = TemperatureClass::Hot;
        let report = apply_domain_rules(&input, Some(ProductKey::BeltConveyor));
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_fluid_levels() {
        let mut input = ConfigurationInput::baseline();
        input.fluid_class = FluidClass::Considerable;
        let report = apply_domain_rules(&input, None);
        assert_eq!(report.warnings[0].severity, Severity::Warning);

        input.fluid_class = FluidClass::Minimal;
        let report = apply_domain_rules(&input, None);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].severity, Severity::Info);
    }

    #[test]
    fn test_finger_safety_without_guards_warns() {
        let mut input = ConfigurationInput::baseline();
        input.finger_safe = true;
        let report = apply_domain_rules(&input, None);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("bottom covers"));

        input.end_guards = EndGuards::Both;
        input.bottom_covers = true;
        assert!(apply_domain_rules(&input, None).warnings.is_empty());
    }

    #[test]
    fn test_side_loading_needs_v_guide() {
        let mut input = ConfigurationInput::baseline();
        input.side_loading_severity = SideLoadSeverity::Heavy;
        let report = apply_domain_rules(&input, None);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.field == "side_loading_severity" && w.severity == Severity::Warning));

        input.belt_tracking_method = TrackingMethod::VGuided;
        let report = apply_domain_rules(&input, None);
        assert!(report.warnings.iter().all(|w| w.field != "side_loading_severity"));
    }

    #[test]
    fn test_tracking_risk_warning_only_for_crowned() {
        let mut input = ConfigurationInput::baseline();
        input.direction_mode = DirectionMode::Reversing;
        input.controls_package = ControlsPackage::Vfd;
        let report = apply_domain_rules(&input, None);
        let tracking: Vec<_> = report
            .warnings
            .iter()
            .filter(|w| w.field == "belt_tracking_method")
            .collect();
        assert_eq!(tracking.len(), 1);
        assert_eq!(tracking[0].severity, Severity::Warning);
        assert!(tracking[0].message.contains("Reversing operation"));

        input.belt_tracking_method = TrackingMethod::VGuided;
        let report = apply_domain_rules(&input, None);
        assert!(report.warnings.iter().all(|w| w.field != "belt_tracking_method"));
    }

    #[test]
    fn test_product_templating_same_fields() {
        let mut input = ConfigurationInput::baseline();
        input.incline_deg = 30.0;
        input.part_temperature_class = TemperatureClass::Hot;
        input.finger_safe = true;
        input.drop_height_in = 30.0;

        let belt = apply_domain_rules(&input, Some(ProductKey::BeltConveyor));
        let slider = apply_domain_rules(&input, Some(ProductKey::SliderBed));
        assert_eq!(belt.fields(), slider.fields());
        assert_ne!(belt.warnings[0].message, slider.warnings[0].message);
        assert!(belt.warnings[0].message.contains("Belt Conveyor"));
        assert!(slider.warnings[0].message.contains("Slider Bed Conveyor"));
    }

    #[test]
    fn test_premium_rule_only_for_premium_product() {
        let mut input = ConfigurationInput::baseline();
        input.environment_class = EnvironmentClass::Washdown;
        input.belt_tracking_method = TrackingMethod::VGuided;

        let sanitary = apply_domain_rules(&input, Some(ProductKey::SanitaryBelt));
        assert!(sanitary.warnings.iter().any(|w| w.field == "frame_finish"));

        for product in [ProductKey::BeltConveyor, ProductKey::SliderBed] {
            let report = apply_domain_rules(&input, Some(product));
            assert!(report.warnings.iter().all(|w| w.field != "frame_finish"));
        }
        let report = apply_domain_rules(&input, None);
        assert!(report.warnings.iter().all(|w| w.field != "frame_finish"));
    }

    #[test]
    fn test_cleat_rule_gated_on_cleat_capability() {
        let mut input = ConfigurationInput::baseline();
        input.incline_deg = 25.0;
        input.cleats_enabled = true;
        input.cleat_height_in = 0.5;

        let belt = apply_domain_rules(&input, Some(ProductKey::BeltConveyor));
        assert!(belt.warnings.iter().any(|w| w.field == "cleat_height_in"));

        let slider = apply_domain_rules(&input, Some(ProductKey::SliderBed));
        assert!(slider.warnings.iter().all(|w| w.field != "cleat_height_in"));
    }

    #[test]
    fn test_reversing_without_reversing_controls() {
        let mut input = ConfigurationInput::baseline();
        input.direction_mode = DirectionMode::Reversing;
        input.belt_tracking_method = TrackingMethod::VGuided;
        let report = apply_domain_rules(&input, None);
        assert!(report.warnings.iter().any(|w| w.field == "controls_package"));
    }

    #[test]
    fn test_rule_ids_unique() {
        let mut ids: Vec<_> = DOMAIN_RULES.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), DOMAIN_RULES.len());
    }

    #[test]
    fn test_long_conveyor_and_drop_height() {
        let mut input = ConfigurationInput::baseline();
        input.conveyor_length_cc_in = 720.0;
        input.drop_height_in = 18.0;
        let report = apply_domain_rules(&input, None);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.field == "conveyor_length_cc_in" && w.severity == Severity::Warning));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.field == "drop_height_in" && w.severity == Severity::Info));
    }

    #[test]
    fn test_gated_rules_skipped_without_product() {
        let gated: Vec<_> = DOMAIN_RULES.iter().filter(|r| r.is_product_gated()).map(|r| r.id).collect();
        assert_eq!(gated, vec!["cleat_height_on_incline", "washdown_frame"]);
        for rule in DOMAIN_RULES {
            assert_eq!(rule.applies_to(None), !rule.is_product_gated(), "{}", rule.id);
        }
    }
}
