//! Copy-ready BOM summary.
//!
//! ```text
//! Drive: SK 1SI50-56C-71S/4
//! Gear Unit:        60692800  SI50 worm gear unit 80:1
//! Motor:            —  PN pending, not included in order (71S/4 motor, 0.5 HP)
//! Adapter:          60100056  56C adapter
//! Output Shaft Kit: —  not required
//!
//! Notes:
//! - CONFIGURED Motor: no authentic vendor part number in catalog
//! ```
//!
//! Components are listed in the fixed resolution order. A resolved component
//! always shows its part number; every other state shows a dash and a
//! qualifier. The notes section lists every Configured and Missing component
//! and is omitted when there are none.

use std::fmt::Write;

use crate::bom::{BomResolution, ComponentState};

/// Placeholder shown instead of a part number
pub const DASH: &str = "—";

const LABEL_WIDTH: usize = 18;

/// Render the plain-text summary of a resolution.
pub fn render_summary(resolution: &BomResolution) -> String {
    let mut out = String::new();
    let drive = resolution
        .parsed
        .as_ref()
        .map_or_else(|| format!("{} (unparsed)", resolution.model_code), |d| d.to_string());
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Drive: {}", drive);

    for component in &resolution.components {
        let label = format!("{}:", component.component_type.display_name());
        let value = match &component.state {
            ComponentState::Resolved(pn) => format!("{}  {}", pn, component.description),
            ComponentState::Configured(selection) => {
                format!("{}  PN pending, not included in order ({})", DASH, selection)
            }
            ComponentState::Missing => format!("{}  select in Drive Arrangement", DASH),
            ComponentState::NotRequired => format!("{}  not required", DASH),
        };
        let _ = writeln!(out, "{:<width$}{}", label, value, width = LABEL_WIDTH);
    }

    let notes: Vec<String> = resolution
        .components
        .iter()
        .filter(|c| matches!(c.state, ComponentState::Configured(_) | ComponentState::Missing))
        .map(|c| {
            format!(
                "- {} {}: {}",
                c.state.label(),
                c.component_type.display_name(),
                c.reason.as_deref().unwrap_or("no reason recorded")
            )
        })
        .collect();

    if !notes.is_empty() {
        out.push('\n');
        out.push_str("Notes:\n");
        for note in notes {
            out.push_str(&note);
            out.push('\n');
        }
    }
    out
}
