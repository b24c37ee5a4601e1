//! # conveyor_core - Conveyor Engineering Calculation Engine
//!
//! `conveyor_core` is the computational heart of the conveyor configurator:
//! it validates a conveyor application, derives its mechanical outputs, scores
//! belt tracking risk and resolves a selected drivetrain to orderable vendor
//! part numbers. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Findings Are Data**: Validation errors and BOM gaps are values, not `Err`
//! - **Never Fabricate**: Unknown part numbers stay unknown; outputs stay finite
//!
//! ## Quick Start
//!
//! ```rust
//! use conveyor_core::orchestrator::{calculate_configuration, CalcContext};
//! use conveyor_core::inputs::ConfigurationInput;
//! use conveyor_core::parameters::ParameterOverrides;
//! use conveyor_core::vocabulary::ProductKey;
//!
//! let result = calculate_configuration(
//!     &ConfigurationInput::baseline(),
//!     ProductKey::BeltConveyor,
//!     &ParameterOverrides::default(),
//!     &CalcContext::default(),
//! );
//!
//! assert!(result.success);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("torque_in_lbf"));
//! ```
//!
//! ## Modules
//!
//! - [`vocabulary`] - Closed enumerations for categorical inputs
//! - [`units`] - Type-safe unit wrappers
//! - [`inputs`] - Configuration record and legacy alias normalization
//! - [`parameters`] - Per-product physical constants and overrides
//! - [`formulas`] - Belt, load and drive formula pipeline
//! - [`validation`] - Structural checks and product-templated domain rules
//! - [`tracking`] - Belt tracking-risk advisor
//! - [`orchestrator`] - Normalize → validate → calculate, with telemetry hooks
//! - [`bom`] - Drivetrain model code to vendor part numbers
//! - [`errors`] - Structured error types

pub mod bom;
pub mod errors;
pub mod formulas;
pub mod inputs;
pub mod orchestrator;
pub mod parameters;
pub mod tracking;
pub mod units;
pub mod validation;
pub mod vocabulary;

// Re-export commonly used types at crate root for convenience
pub use bom::{render_summary, resolve, BomResolution, InMemoryCatalog, ResolveContext, VendorCatalog};
pub use errors::{CoreError, CoreResult};
pub use formulas::{calculate, Outputs};
pub use inputs::{normalize, ConfigurationInput};
pub use orchestrator::{run_calculation, CalcContext, CalcObserver, CalculationRequest, CalculationResult};
pub use parameters::{ParameterOverrides, Parameters};
pub use tracking::{assess, RiskLevel, TrackingAssessment};
pub use validation::{validate, Severity, ValidationMessage, ValidationReport};
pub use vocabulary::ProductKey;
