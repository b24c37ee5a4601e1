//! Vendor component catalog.
//!
//! The resolver reads vendor part numbers through the [`VendorCatalog`]
//! trait. A catalog answers one kind of question: rows for a vendor and
//! component type whose metadata matches every filter in a
//! [`CatalogQuery`]. Catalogs are read-only and tolerant of missing rows
//! (an empty result is not an error).
//!
//! [`InMemoryCatalog`] backs tests and file-loaded catalogs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bom::round_ratio;
use crate::errors::CoreResult;
use crate::vocabulary::ComponentType;

/// Metadata keys used by the resolver
pub mod keys {
    pub const SIZE: &str = "size";
    pub const RATIO: &str = "ratio";
    pub const MOUNTING_VARIANT: &str = "mounting_variant";
    pub const ADAPTER_CODE: &str = "adapter_code";
    pub const MOTOR_FRAME: &str = "motor_frame";
    pub const HP: &str = "hp";
    pub const SHAFT_OPTION: &str = "shaft_option";
    pub const SHAFT_STYLE: &str = "shaft_style";
    pub const SHAFT_DIAMETER_IN: &str = "shaft_diameter_in";
}

/// Tolerance for plain numeric metadata comparisons
const NUMBER_TOLERANCE: f64 = 1e-6;

/// One vendor component row.
///
/// ## JSON Example
///
/// ```json
/// {
///   "vendor": "NORD",
///   "component_type": "gear_unit",
///   "vendor_part_number": "60692800",
///   "description": "SI50 worm gear unit, 80:1, hollow shaft",
///   "metadata": { "size": 50, "ratio": 80.0, "mounting_variant": "shaft_mounted" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub vendor: String,
    pub component_type: ComponentType,
    pub vendor_part_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

/// Predicate on one metadata key
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataFilter {
    /// Case-insensitive string equality
    Text(String),
    /// Numeric equality within a small tolerance
    Number(f64),
    /// Numeric equality after rounding both sides to one decimal
    Ratio(f64),
    /// Key missing or null
    Absent,
}

impl MetadataFilter {
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            MetadataFilter::Absent => value.map_or(true, Value::is_null),
            MetadataFilter::Text(expected) => value
                .and_then(value_as_text)
                .is_some_and(|actual| actual.eq_ignore_ascii_case(expected)),
            MetadataFilter::Number(expected) => value
                .and_then(value_as_number)
                .is_some_and(|actual| (actual - expected).abs() < NUMBER_TOLERANCE),
            MetadataFilter::Ratio(expected) => value
                .and_then(value_as_number)
                .is_some_and(|actual| round_ratio(actual) == round_ratio(*expected)),
        }
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A catalog question: vendor + component type + metadata filters
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub vendor: String,
    pub component_type: ComponentType,
    pub filters: Vec<(&'static str, MetadataFilter)>,
}

impl CatalogQuery {
    pub fn new(vendor: impl Into<String>, component_type: ComponentType) -> Self {
        CatalogQuery {
            vendor: vendor.into(),
            component_type,
            filters: Vec::new(),
        }
    }

    /// Add a filter (builder style)
    pub fn with(mut self, key: &'static str, filter: MetadataFilter) -> Self {
        self.filters.push((key, filter));
        self
    }

    pub fn matches(&self, row: &CatalogRow) -> bool {
        row.vendor.eq_ignore_ascii_case(&self.vendor)
            && row.component_type == self.component_type
            && self
                .filters
                .iter()
                .all(|(key, filter)| filter.matches(row.metadata.get(*key)))
    }
}

/// Read-only source of vendor component rows
#[async_trait]
pub trait VendorCatalog: Send + Sync {
    /// Rows matching the query, in catalog order. No match is `Ok(vec![])`.
    async fn query(&self, query: &CatalogQuery) -> CoreResult<Vec<CatalogRow>>;
}

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    pub rows: Vec<CatalogRow>,
}

impl InMemoryCatalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        InMemoryCatalog { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse a JSON array of rows
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let rows: Vec<CatalogRow> = serde_json::from_str(json)?;
        Ok(InMemoryCatalog { rows })
    }
}

#[async_trait]
impl VendorCatalog for InMemoryCatalog {
    async fn query(&self, query: &CatalogQuery) -> CoreResult<Vec<CatalogRow>> {
        Ok(self.rows.iter().filter(|row| query.matches(row)).cloned().collect())
    }
}
