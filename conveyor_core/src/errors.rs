//! # Error Types
//!
//! Exceptional faults raised by conveyor_core. Validation findings and BOM
//! resolution gaps are *not* errors in this sense: they travel as data inside
//! [`crate::validation::ValidationReport`] and [`crate::bom::BomResolution`].
//! A `CoreError` means the engine could not even start: the configuration
//! object was malformed, or a collaborator failed outside BOM resolution.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::errors::{CoreError, CoreResult};
//!
//! fn require_object(raw: &serde_json::Value) -> CoreResult<()> {
//!     if !raw.is_object() {
//!         return Err(CoreError::malformed_input("$", "configuration must be a JSON object"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_object(&serde_json::json!([1, 2])).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for conveyor_core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Structured error type for exceptional engine faults.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CoreError {
    /// The configuration object could not be interpreted at all
    #[error("Malformed configuration at '{path}': {reason}")]
    MalformedInput { path: String, reason: String },

    /// The vendor component catalog could not be queried
    #[error("Catalog unavailable ({source_name}): {reason}")]
    CatalogUnavailable { source_name: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CoreError {
    /// Create a MalformedInput error
    pub fn malformed_input(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a CatalogUnavailable error
    pub fn catalog_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::CatalogUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CoreError::CatalogUnavailable { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::MalformedInput { .. } => "MALFORMED_INPUT",
            CoreError::CatalogUnavailable { .. } => "CATALOG_UNAVAILABLE",
            CoreError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::SerializationError {
            reason: err.to_string(),
        }
    }
}
