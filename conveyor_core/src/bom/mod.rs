//! # BOM Resolver
//!
//! Maps a drivetrain model code to orderable vendor part numbers.
//!
//! ## Flow
//!
//! ```text
//! model code ──► DrivetrainDescriptor (or unparseable)
//!            ──► per component: ordered lookup tiers against a VendorCatalog
//!            ──► Resolved / Configured / Missing / NotRequired
//!            ──► BomResolution + copy-ready summary
//! ```
//!
//! ## Component states
//!
//! | state        | meaning                                         | part number |
//! |--------------|-------------------------------------------------|-------------|
//! | Resolved     | authentic vendor part number found              | yes         |
//! | Configured   | selection made, no authentic part number yet    | never       |
//! | Missing      | a required selection or input is absent         | never       |
//! | NotRequired  | the arrangement does not use this component     | n/a         |
//!
//! Only authentic part numbers ever reach output: exactly 8 ASCII digits
//! starting with 3 or 6. Internal catalog keys such as `SI50-0.5` never do.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::bom::{is_authentic_part_number, round_ratio};
//!
//! assert!(is_authentic_part_number("60692800"));
//! assert!(!is_authentic_part_number("SI50-0.5"));
//! assert_eq!(round_ratio(79.9999), 80.0);
//! ```

pub mod catalog;
pub mod descriptor;
pub mod lookup;
pub mod resolver;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::vocabulary::{ComponentType, MountingStyle, ShaftOption, ShaftStyle};

pub use catalog::{CatalogQuery, CatalogRow, InMemoryCatalog, MetadataFilter, VendorCatalog};
pub use descriptor::DrivetrainDescriptor;
pub use lookup::{first_authentic, LookupOutcome, LookupTier};
pub use resolver::resolve;
pub use summary::render_summary;

/// Vendor queried when none is configured
pub const DEFAULT_VENDOR: &str = "NORD";

/// Length of a vendor part number
pub const PART_NUMBER_LEN: usize = 8;

/// Whether `candidate` is a real vendor part number: exactly 8 ASCII digits
/// with a leading 3 or 6.
pub fn is_authentic_part_number(candidate: &str) -> bool {
    candidate.len() == PART_NUMBER_LEN
        && candidate.bytes().all(|b| b.is_ascii_digit())
        && matches!(candidate.as_bytes()[0], b'3' | b'6')
}

/// Round a gear ratio to one decimal for comparison.
///
/// Idempotent: `round_ratio(round_ratio(r)) == round_ratio(r)`.
pub fn round_ratio(ratio: f64) -> f64 {
    (ratio * 10.0).round() / 10.0
}

// ============================================================================
// Component Entries
// ============================================================================

/// Resolution state of one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ComponentState {
    /// Authentic vendor part number
    Resolved(String),
    /// Selection label; the part number is still pending
    Configured(String),
    /// A required selection or input is absent
    Missing,
    /// Not used by this drive arrangement
    NotRequired,
}

impl ComponentState {
    /// Part number, only ever for `Resolved`
    pub fn part_number(&self) -> Option<&str> {
        match self {
            ComponentState::Resolved(pn) => Some(pn),
            _ => None,
        }
    }

    /// Resolved or not required: nothing left to do for this component
    pub fn is_settled(&self) -> bool {
        matches!(self, ComponentState::Resolved(_) | ComponentState::NotRequired)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentState::Resolved(_) => "RESOLVED",
            ComponentState::Configured(_) => "CONFIGURED",
            ComponentState::Missing => "MISSING",
            ComponentState::NotRequired => "NOT REQUIRED",
        }
    }
}

/// One bill-of-materials line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomComponent {
    pub component_type: ComponentType,
    pub state: ComponentState,
    /// Catalog description when resolved, otherwise a description of the selection
    pub description: String,
    /// Why the component is Configured or Missing
    pub reason: Option<String>,
}

impl BomComponent {
    pub fn resolved(component_type: ComponentType, row: &CatalogRow) -> Self {
        let description = if row.description.is_empty() {
            component_type.display_name().to_string()
        } else {
            row.description.clone()
        };
        BomComponent {
            component_type,
            state: ComponentState::Resolved(row.vendor_part_number.clone()),
            description,
            reason: None,
        }
    }

    pub fn configured(component_type: ComponentType, selection: impl Into<String>, reason: impl Into<String>) -> Self {
        let selection = selection.into();
        BomComponent {
            component_type,
            description: selection.clone(),
            state: ComponentState::Configured(selection),
            reason: Some(reason.into()),
        }
    }

    pub fn missing(component_type: ComponentType, reason: impl Into<String>) -> Self {
        BomComponent {
            component_type,
            state: ComponentState::Missing,
            description: component_type.display_name().to_string(),
            reason: Some(reason.into()),
        }
    }

    pub fn not_required(component_type: ComponentType, reason: impl Into<String>) -> Self {
        BomComponent {
            component_type,
            state: ComponentState::NotRequired,
            description: component_type.display_name().to_string(),
            reason: Some(reason.into()),
        }
    }

    /// Flat projection for JSON consumers
    pub fn view(&self) -> BomComponentView {
        BomComponentView {
            component_type: self.component_type,
            part_number: self.state.part_number().map(str::to_string),
            description: self.description.clone(),
            found: self.state.is_settled(),
        }
    }
}

/// Flat JSON view of a [`BomComponent`].
///
/// ## JSON Example
///
/// ```json
/// { "component_type": "gear_unit", "part_number": "60692800", "description": "SI50 worm gear unit", "found": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomComponentView {
    pub component_type: ComponentType,
    pub part_number: Option<String>,
    pub description: String,
    pub found: bool,
}

/// Full resolution of one model code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomResolution {
    pub model_code: String,
    /// `None` when the model code is unparseable
    pub parsed: Option<DrivetrainDescriptor>,
    /// One entry per [`ComponentType::ALL`], in that order
    pub components: Vec<BomComponent>,
    /// Every component is Resolved or NotRequired
    pub complete: bool,
}

impl BomResolution {
    pub fn component(&self, component_type: ComponentType) -> Option<&BomComponent> {
        self.components.iter().find(|c| c.component_type == component_type)
    }

    pub fn views(&self) -> Vec<BomComponentView> {
        self.components.iter().map(BomComponent::view).collect()
    }

    /// Authentic part numbers ready to order, in component order
    pub fn orderable_part_numbers(&self) -> Vec<&str> {
        self.components.iter().filter_map(|c| c.state.part_number()).collect()
    }
}

// ============================================================================
// Resolve Context
// ============================================================================

/// Drive arrangement selections that steer resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveContext {
    pub vendor: String,
    pub mounting_style: MountingStyle,
    pub shaft_option: Option<ShaftOption>,
    pub shaft_style: Option<ShaftStyle>,
    /// Legacy shaft selector, used only when no style row matches
    pub shaft_diameter_in: Option<f64>,
    /// Ratio of the worm stage alone, never the total drive ratio
    pub worm_ratio: Option<f64>,
}

impl Default for ResolveContext {
    fn default() -> Self {
        ResolveContext {
            vendor: DEFAULT_VENDOR.to_string(),
            mounting_style: MountingStyle::ShaftMounted,
            shaft_option: None,
            shaft_style: None,
            shaft_diameter_in: None,
            worm_ratio: None,
        }
    }
}
