//! # Validation Engine
//!
//! Two tiers of checks, both returning data rather than `Err`:
//!
//! 1. [`structural`]: field-local range and positivity checks on the raw
//!    configuration and on the effective parameters. Every failure is a
//!    blocking error; all failures are collected.
//! 2. [`rules`]: application rules that look at combinations of fields and
//!    emit errors, warnings and informational notes. Rules are product
//!    templated and optionally capability gated.
//!
//! [`validate`] composes both tiers.
//!
//! ## Severity contract
//!
//! `errors` only ever holds [`Severity::Error`] items and blocks the
//! configuration. `warnings` holds [`Severity::Warning`] and
//! [`Severity::Info`] items; neither blocks computation.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::inputs::ConfigurationInput;
//! use conveyor_core::parameters::Parameters;
//! use conveyor_core::validation::validate;
//! use conveyor_core::vocabulary::{ProductKey, TemperatureClass};
//!
//! let mut input = ConfigurationInput::baseline();
//! input.part_temperature_class = TemperatureClass::RedHot;
//!
//! let report = validate(&input, &Parameters::default(), Some(ProductKey::BeltConveyor));
//! assert!(!report.is_valid());
//! assert_eq!(report.errors[0].field, "part_temperature_class");
//! ```

pub mod rules;
pub mod structural;

use serde::{Deserialize, Serialize};

use crate::inputs::ConfigurationInput;
use crate::parameters::Parameters;
use crate::vocabulary::ProductKey;

pub use rules::{apply_domain_rules, DomainRule, RuleContext, DOMAIN_RULES};
pub use structural::{validate_effective_parameters, validate_parameters, validate_structural, ValidRange};

/// Severity of a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocking: the configuration is not valid for ordering
    Error,
    /// Advisory
    Warning,
    /// Informational note
    Info,
}

/// One finding, scoped to a field.
///
/// ## JSON Example
///
/// ```json
/// { "field": "incline_deg", "message": "Incline of 46.0° exceeds the 45° maximum for a Belt Conveyor", "severity": "error" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationMessage {
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, Severity::Error)
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, Severity::Warning)
    }

    pub fn info(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, Severity::Info)
    }

    fn new(field: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        ValidationMessage {
            field: field.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Errors and advisories for one configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Blocking findings
    pub errors: Vec<ValidationMessage>,
    /// Warning- and info-severity findings
    pub warnings: Vec<ValidationMessage>,
}

impl ValidationReport {
    /// Route messages into `errors` or `warnings` by severity
    pub fn from_messages(messages: impl IntoIterator<Item = ValidationMessage>) -> Self {
        let mut report = ValidationReport::default();
        report.extend(messages);
        report
    }

    pub fn push(&mut self, message: ValidationMessage) {
        if message.is_blocking() {
            self.errors.push(message);
        } else {
            self.warnings.push(message);
        }
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = ValidationMessage>) {
        for message in messages {
            self.push(message);
        }
    }

    /// Append another report, keeping order
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// No blocking errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Warning-severity items only
    pub fn warnings_only(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.warnings.iter().filter(|m| m.severity == Severity::Warning)
    }

    /// Info-severity items only
    pub fn notes(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.warnings.iter().filter(|m| m.severity == Severity::Info)
    }

    /// Distinct fields with at least one finding, sorted
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self
            .errors
            .iter()
            .chain(self.warnings.iter())
            .map(|m| m.field.as_str())
            .collect();
        fields.sort_unstable();
        fields.dedup();
        fields
    }
}

/// Run structural checks, parameter checks and domain rules.
pub fn validate(
    input: &ConfigurationInput,
    params: &Parameters,
    product: Option<ProductKey>,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.extend(validate_structural(input));
    report.extend(validate_effective_parameters(params, input));
    report.merge(apply_domain_rules(input, product));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::TemperatureClass;

    #[test]
    fn test_clean_configuration() {
        let report = validate(
            &ConfigurationInput::baseline(),
            &Parameters::for_product(ProductKey::BeltConveyor),
            Some(ProductKey::BeltConveyor),
        );
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn test_collects_all_structural_failures() {
        let input = ConfigurationInput {
            conveyor_length_cc_in: -1.0,
            belt_width_in: 0.0,
            ..ConfigurationInput::baseline()
        };
        let params = Parameters {
            safety_factor: 9.0,
            ..Parameters::default()
        };
        let report = validate(&input, &params, None);
        let fields = report.fields();
        assert!(fields.contains(&"conveyor_length_cc_in"));
        assert!(fields.contains(&"belt_width_in"));
        assert!(fields.contains(&"safety_factor"));
    }

    #[test]
    fn test_bad_override_reported_once() {
        use crate::parameters::{effective_parameters, ParameterOverrides};

        let mut input = ConfigurationInput::baseline();
        input.safety_factor_override = Some(0.5);
        let params = effective_parameters(ProductKey::BeltConveyor, &ParameterOverrides::default(), &input);
        let report = validate(&input, &params, Some(ProductKey::BeltConveyor));
        assert_eq!(report.errors.len(), 1, "{:?}", report.errors);
        assert_eq!(report.errors[0].field, "safety_factor_override");
    }

    #[test]
    fn test_severity_routing() {
        let report = ValidationReport::from_messages(vec![
            ValidationMessage::error("a", "x"),
            ValidationMessage::warning("b", "y"),
            ValidationMessage::info("c", "z"),
        ]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings_only().count(), 1);
        assert_eq!(report.notes().count(), 1);
    }

    #[test]
    fn test_deterministic() {
        let mut input = ConfigurationInput::baseline();
        input.part_temperature_class = TemperatureClass::Hot;
        input.incline_deg = 30.0;
        let params = Parameters::default();
        let a = serde_json::to_string(&validate(&input, &params, Some(ProductKey::SliderBed))).unwrap();
        let b = serde_json::to_string(&validate(&input, &params, Some(ProductKey::SliderBed))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&ValidationMessage::info("f", "m")).unwrap();
        assert!(json.contains("\"severity\":\"info\""));
    }
}
