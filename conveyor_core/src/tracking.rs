//! # Tracking-Risk Advisor
//!
//! Scores how hard a belt will be to keep centered and recommends a tracking
//! method. Six factors are assessed independently, each Low / Medium / High
//! with a short rationale, then blended:
//!
//! - any High factor, or two or more Medium factors → High
//! - exactly one Medium factor → Medium
//! - otherwise → Low
//!
//! V-guided tracking is recommended at Medium or High, crowned pulleys
//! otherwise. The advisor is purely advisory: it never produces a blocking
//! error. The validation engine turns a Medium/High assessment into a
//! warning when the configuration still specifies crowned tracking.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::inputs::ConfigurationInput;
//! use conveyor_core::tracking::{assess, RiskLevel};
//! use conveyor_core::vocabulary::{DirectionMode, TrackingMethod};
//!
//! let mut input = ConfigurationInput::baseline();
//! input.direction_mode = DirectionMode::Reversing;
//!
//! let assessment = assess(&input);
//! assert_eq!(assessment.risk_level, RiskLevel::High);
//! assert_eq!(assessment.recommendation, TrackingMethod::VGuided);
//! ```

use serde::{Deserialize, Serialize};

use crate::inputs::ConfigurationInput;
use crate::vocabulary::{DirectionMode, EnvironmentClass, SideLoadSeverity, TrackingMethod};

/// Below this length/width ratio the belt is short and wide: High risk
const LW_RATIO_HIGH: f64 = 2.0;
/// Below this length/width ratio: Medium risk
const LW_RATIO_MEDIUM: f64 = 4.0;
/// Indexing faster than this (s per cycle) counts as aggressive start/stop
const FAST_CYCLE_S: f64 = 5.0;
/// Belt speed thresholds (fpm)
const SPEED_HIGH_FPM: f64 = 300.0;
const SPEED_MEDIUM_FPM: f64 = 150.0;

/// Risk level of one factor or of the overall assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The six assessed factors, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingFactor {
    LengthWidthRatio,
    Reversing,
    SideLoading,
    Accumulation,
    Environment,
    BeltSpeed,
}

impl TrackingFactor {
    pub const ALL: [TrackingFactor; 6] = [
        TrackingFactor::LengthWidthRatio,
        TrackingFactor::Reversing,
        TrackingFactor::SideLoading,
        TrackingFactor::Accumulation,
        TrackingFactor::Environment,
        TrackingFactor::BeltSpeed,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            TrackingFactor::LengthWidthRatio => "Length/width ratio",
            TrackingFactor::Reversing => "Reversing operation",
            TrackingFactor::SideLoading => "Side loading",
            TrackingFactor::Accumulation => "Accumulation / cycling",
            TrackingFactor::Environment => "Environment",
            TrackingFactor::BeltSpeed => "Belt speed",
        }
    }
}

/// Score for a single factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorAssessment {
    pub factor: TrackingFactor,
    pub level: RiskLevel,
    pub rationale: String,
}

impl FactorAssessment {
    fn new(factor: TrackingFactor, level: RiskLevel, rationale: impl Into<String>) -> Self {
        FactorAssessment {
            factor,
            level,
            rationale: rationale.into(),
        }
    }
}

/// Overall tracking assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingAssessment {
    /// Recommended tracking method
    pub recommendation: TrackingMethod,
    /// Blended risk level
    pub risk_level: RiskLevel,
    /// Per-factor scores, in [`TrackingFactor::ALL`] order
    pub factors: Vec<FactorAssessment>,
    /// One line per High factor
    pub warnings: Vec<String>,
    /// One line per Medium factor
    pub notes: Vec<String>,
}

impl TrackingAssessment {
    /// Factors scored at the given level
    pub fn factors_at(&self, level: RiskLevel) -> impl Iterator<Item = &FactorAssessment> {
        self.factors.iter().filter(move |f| f.level == level)
    }
}

/// Assess tracking risk for a configuration.
pub fn assess(input: &ConfigurationInput) -> TrackingAssessment {
    let factors = vec![
        assess_length_width(input),
        assess_reversing(input),
        assess_side_loading(input),
        assess_accumulation(input),
        assess_environment(input),
        assess_speed(input),
    ];

    let risk_level = blend(&factors);
    let recommendation = match risk_level {
        RiskLevel::Low => TrackingMethod::Crowned,
        RiskLevel::Medium | RiskLevel::High => TrackingMethod::VGuided,
    };

    let line = |f: &FactorAssessment| format!("{}: {}", f.factor.display_name(), f.rationale);
    let warnings = factors
        .iter()
        .filter(|f| f.level == RiskLevel::High)
        .map(line)
        .collect();
    let notes = factors
        .iter()
        .filter(|f| f.level == RiskLevel::Medium)
        .map(line)
        .collect();

    TrackingAssessment {
        recommendation,
        risk_level,
        factors,
        warnings,
        notes,
    }
}

/// Blend per-factor levels into one overall level.
pub fn blend(factors: &[FactorAssessment]) -> RiskLevel {
    let highs = factors.iter().filter(|f| f.level == RiskLevel::High).count();
    let mediums = factors.iter().filter(|f| f.level == RiskLevel::Medium).count();
    if highs > 0 || mediums >= 2 {
        RiskLevel::High
    } else if mediums == 1 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// ============================================================================
// Factor Scoring
// ============================================================================

fn assess_length_width(input: &ConfigurationInput) -> FactorAssessment {
    let ratio = input.length_to_width_ratio();
    let factor = TrackingFactor::LengthWidthRatio;
    if ratio < LW_RATIO_HIGH {
        FactorAssessment::new(
            factor,
            RiskLevel::High,
            format!("ratio {:.1}:1 is below {:.0}:1; short, wide belts resist crowning", ratio, LW_RATIO_HIGH),
        )
    } else if ratio < LW_RATIO_MEDIUM {
        FactorAssessment::new(
            factor,
            RiskLevel::Medium,
            format!("ratio {:.1}:1 is below {:.0}:1", ratio, LW_RATIO_MEDIUM),
        )
    } else {
        FactorAssessment::new(factor, RiskLevel::Low, format!("ratio {:.1}:1", ratio))
    }
}

fn assess_reversing(input: &ConfigurationInput) -> FactorAssessment {
    let factor = TrackingFactor::Reversing;
    match input.direction_mode {
        DirectionMode::Reversing => FactorAssessment::new(
            factor,
            RiskLevel::High,
            "crowned pulleys track poorly when the belt reverses",
        ),
        DirectionMode::OneWay => FactorAssessment::new(factor, RiskLevel::Low, "one-way operation"),
    }
}

fn assess_side_loading(input: &ConfigurationInput) -> FactorAssessment {
    let factor = TrackingFactor::SideLoading;
    match input.side_loading_severity {
        SideLoadSeverity::Heavy => FactorAssessment::new(
            factor,
            RiskLevel::High,
            "heavy side loading pushes the belt off center",
        ),
        SideLoadSeverity::Moderate => FactorAssessment::new(
            factor,
            RiskLevel::Medium,
            "moderate side loading",
        ),
        SideLoadSeverity::Light => FactorAssessment::new(factor, RiskLevel::Low, "light side loading"),
        SideLoadSeverity::None => FactorAssessment::new(factor, RiskLevel::Low, "no side loading"),
    }
}

fn assess_accumulation(input: &ConfigurationInput) -> FactorAssessment {
    let factor = TrackingFactor::Accumulation;
    let fast_cycle = input
        .cycle_time_s
        .is_some_and(|t| t.is_finite() && t > 0.0 && t < FAST_CYCLE_S);
    match (input.accumulation, fast_cycle) {
        (true, _) => FactorAssessment::new(
            factor,
            RiskLevel::Medium,
            "accumulating parts drag on the belt",
        ),
        (false, true) => FactorAssessment::new(
            factor,
            RiskLevel::Medium,
            format!("start/stop cycling faster than {:.0} s", FAST_CYCLE_S),
        ),
        (false, false) => FactorAssessment::new(factor, RiskLevel::Low, "continuous running"),
    }
}

fn assess_environment(input: &ConfigurationInput) -> FactorAssessment {
    let factor = TrackingFactor::Environment;
    match input.environment_class {
        EnvironmentClass::Outdoor => FactorAssessment::new(
            factor,
            RiskLevel::High,
            "outdoor temperature swings and debris",
        ),
        EnvironmentClass::Dusty => FactorAssessment::new(
            factor,
            RiskLevel::Medium,
            "dust build-up on pulleys changes the effective crown",
        ),
        EnvironmentClass::Washdown => FactorAssessment::new(
            factor,
            RiskLevel::Medium,
            "wet belt reduces pulley grip",
        ),
        EnvironmentClass::Indoor => FactorAssessment::new(factor, RiskLevel::Low, "clean indoor environment"),
    }
}

fn assess_speed(input: &ConfigurationInput) -> FactorAssessment {
    let factor = TrackingFactor::BeltSpeed;
    let speed = input.belt_speed_fpm;
    if speed > SPEED_HIGH_FPM {
        FactorAssessment::new(
            factor,
            RiskLevel::High,
            format!("{:.0} fpm exceeds {:.0} fpm", speed, SPEED_HIGH_FPM),
        )
    } else if speed > SPEED_MEDIUM_FPM {
        FactorAssessment::new(
            factor,
            RiskLevel::Medium,
            format!("{:.0} fpm exceeds {:.0} fpm", speed, SPEED_MEDIUM_FPM),
        )
    } else {
        FactorAssessment::new(factor, RiskLevel::Low, format!("{:.0} fpm", speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_low_risk() {
        let assessment = assess(&ConfigurationInput::baseline());
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.recommendation, TrackingMethod::Crowned);
        assert!(assessment.warnings.is_empty());
        assert!(assessment.notes.is_empty());
        assert_eq!(assessment.factors.len(), 6);
    }

    #[test]
    fn test_factor_order_is_stable() {
        let assessment = assess(&ConfigurationInput::baseline());
        let order: Vec<_> = assessment.factors.iter().map(|f| f.factor).collect();
        assert_eq!(order, TrackingFactor::ALL.to_vec());
    }

    #[test]
    fn test_single_medium_is_medium() {
        let mut input = ConfigurationInput::baseline();
        input.side_loading_severity = SideLoadSeverity::Moderate;
        let assessment = assess(&input);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
        assert_eq!(assessment.recommendation, TrackingMethod::VGuided);
        assert_eq!(assessment.notes.len(), 1);
        assert!(assessment.warnings.is_empty());
    }

    #[test]
    fn test_two_mediums_escalate_to_high() {
        let mut input = ConfigurationInput::baseline();
        input.side_loading_severity = SideLoadSeverity::Moderate;
        input.environment_class = EnvironmentClass::Dusty;
        let assessment = assess(&input);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.factors_at(RiskLevel::Medium).count(), 2);
    }

    #[test]
    fn test_any_high_is_high() {
        let mut input = ConfigurationInput::baseline();
        input.belt_speed_fpm = 350.0;
        let assessment = assess(&input);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.warnings.len(), 1);
        assert!(assessment.warnings[0].starts_with("Belt speed"));
    }

    #[test]
    fn test_length_width_bands() {
        let mut input = ConfigurationInput::baseline();
        input.conveyor_length_cc_in = 30.0; // 30 / 18 = 1.67
        assert_eq!(assess_length_width(&input).level, RiskLevel::High);
        input.conveyor_length_cc_in = 54.0; // 3.0
        assert_eq!(assess_length_width(&input).level, RiskLevel::Medium);
        input.conveyor_length_cc_in = 72.0; // 4.0
        assert_eq!(assess_length_width(&input).level, RiskLevel::Low);
    }

    #[test]
    fn test_fast_cycle_counts_as_medium() {
        let mut input = ConfigurationInput::baseline();
        input.cycle_time_s = Some(3.0);
        assert_eq!(assess_accumulation(&input).level, RiskLevel::Medium);
        input.cycle_time_s = Some(30.0);
        assert_eq!(assess_accumulation(&input).level, RiskLevel::Low);
    }

    #[test]
    fn test_blend_rules() {
        let f = |level| FactorAssessment::new(TrackingFactor::BeltSpeed, level, "");
        assert_eq!(blend(&[f(RiskLevel::Low), f(RiskLevel::Low)]), RiskLevel::Low);
        assert_eq!(blend(&[f(RiskLevel::Medium), f(RiskLevel::Low)]), RiskLevel::Medium);
        assert_eq!(blend(&[f(RiskLevel::Medium), f(RiskLevel::Medium)]), RiskLevel::High);
        assert_eq!(blend(&[f(RiskLevel::High)]), RiskLevel::High);
    }
}
