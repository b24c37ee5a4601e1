//! Vendor catalog file loading.
//!
//! The catalog file is a JSON array of [`CatalogRow`]s:
//!
//! ```json
//! [
//!   { "vendor": "NORD", "component_type": "motor", "vendor_part_number": "33010500",
//!     "description": "0.5 HP TEFC motor", "metadata": { "hp": 0.5, "motor_frame": "71S/4" } }
//! ]
//! ```
//!
//! [`CatalogRow`]: conveyor_core::bom::CatalogRow

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use conveyor_core::bom::InMemoryCatalog;

/// Read a catalog file into memory.
pub fn load_catalog(path: &Path) -> Result<InMemoryCatalog> {
    let json = fs::read_to_string(path).with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog =
        InMemoryCatalog::from_json(&json).with_context(|| format!("invalid catalog file {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = catalog.len(), "loaded vendor catalog");
    Ok(catalog)
}

/// Load the catalog when a path is configured; an empty catalog otherwise.
pub fn load_optional(path: Option<&Path>) -> Result<InMemoryCatalog> {
    match path {
        Some(path) => load_catalog(path),
        None => {
            tracing::warn!("no vendor catalog configured; every component will resolve as pending");
            Ok(InMemoryCatalog::default())
        }
    }
}
