//! Human-readable output for each command.

use std::fmt::Write;

use conveyor_core::orchestrator::CalculationResult;
use conveyor_core::tracking::TrackingAssessment;
use conveyor_core::validation::{Severity, ValidationMessage, ValidationReport};

const RULE: &str = "═══════════════════════════════════════";

fn status(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERROR",
        Severity::Warning => "WARN ",
        Severity::Info => "INFO ",
    }
}

fn write_messages(out: &mut String, messages: &[ValidationMessage]) {
    for m in messages {
        let _ = writeln!(out, "  {} {}: {}", severity_tag(m.severity), m.field, m.message);
    }
}

/// Findings block shared by `calc` and `validate`
fn write_findings(out: &mut String, errors: &[ValidationMessage], warnings: &[ValidationMessage]) {
    if errors.is_empty() && warnings.is_empty() {
        let _ = writeln!(out, "No findings.");
        return;
    }
    let _ = writeln!(out, "Findings:");
    write_messages(out, errors);
    write_messages(out, warnings);
}

pub fn calculation(result: &CalculationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "  {} ({} v{})",
        result.metadata.product.display_name(),
        result.metadata.model_key,
        result.metadata.model_version
    );
    let _ = writeln!(out, "{}", RULE);

    if let Some(o) = &result.outputs {
        let _ = writeln!(out, "Belt:");
        let _ = writeln!(out, "  Length:       {:.2} in", o.belt_length_in);
        let _ = writeln!(out, "  Weight:       {:.2} lbf", o.belt_weight_lbf);
        let _ = writeln!(out, "Load:");
        let _ = writeln!(out, "  Parts:        {:.1}", o.parts_on_belt);
        let _ = writeln!(out, "  Total load:   {:.2} lbf", o.total_load_lbf);
        let _ = writeln!(out, "  Belt pull:    {:.2} lbf", o.belt_pull_lbf);
        let _ = writeln!(out, "Drive:");
        let _ = writeln!(out, "  Shaft speed:  {:.2} rpm", o.drive_shaft_rpm);
        let _ = writeln!(out, "  Torque:       {:.1} in-lbf ({:.2} ft-lbf)", o.torque_in_lbf, o.torque_ft_lbf);
        let _ = writeln!(out, "  Gear ratio:   {:.1}:1", o.gear_ratio);
        let _ = writeln!(out, "  Horsepower:   {:.3} HP", o.horsepower_required);
        let _ = writeln!(out, "Throughput:");
        let _ = writeln!(out, "  Capacity:     {:.0} parts/h", o.capacity_pph);
        if let Some(margin) = o.throughput_margin {
            let _ = writeln!(out, "  Margin:       {:+.0}%", margin * 100.0);
        }
    }

    let _ = writeln!(out);
    write_findings(&mut out, &result.errors, &result.warnings);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  RESULT: {}", status(result.success));
    let _ = writeln!(out, "{}", RULE);
    out
}

pub fn validation(report: &ValidationReport) -> String {
    let mut out = String::new();
    write_findings(&mut out, &report.errors, &report.warnings);
    let _ = writeln!(
        out,
        "{} error(s), {} warning(s), {} note(s) {}",
        report.errors.len(),
        report.warnings_only().count(),
        report.notes().count(),
        status(report.is_valid())
    );
    out
}

pub fn tracking(assessment: &TrackingAssessment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tracking risk:   {}", assessment.risk_level);
    let _ = writeln!(out, "Recommendation:  {}", assessment.recommendation);
    let _ = writeln!(out, "Factors:");
    for f in &assessment.factors {
        let _ = writeln!(out, "  {:<24}{:<8}{}", f.factor.display_name(), f.level.display_name(), f.rationale);
    }
    for w in &assessment.warnings {
        let _ = writeln!(out, "  WARN  {}", w);
    }
    for n in &assessment.notes {
        let _ = writeln!(out, "  NOTE  {}", n);
    }
    out
}
