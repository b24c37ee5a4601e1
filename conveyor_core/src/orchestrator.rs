//! # Calculation Orchestrator
//!
//! One entry point, [`run_calculation`], that takes a raw JSON configuration
//! and returns a complete [`CalculationResult`]:
//!
//! ```text
//! raw JSON ──► normalize aliases ──► effective parameters
//!          ──► validate (structural + domain rules)
//!          ──► formulas (always)
//!          ──► result + metadata
//! ```
//!
//! Outputs are computed even when validation reports blocking errors, so a
//! caller can show derived values next to the errors the user is fixing.
//! `success` is true only when there are no errors.
//!
//! Telemetry is opt-in and per call: pass a [`CalcObserver`] inside the
//! [`CalcContext`]. Results are identical with or without an observer.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::orchestrator::{run_calculation, CalcContext, CalculationRequest};
//! use conveyor_core::vocabulary::ProductKey;
//! use serde_json::json;
//!
//! let request = CalculationRequest {
//!     product: ProductKey::BeltConveyor,
//!     inputs: json!({
//!         "conveyor_length_cc_in": 120.0,
//!         "belt_width": 18.0,
//!         "drive_pulley_diameter_in": 4.0,
//!         "tail_pulley_diameter_in": 4.0,
//!         "belt_speed_fpm": 50.0,
//!         "part_weight_lbs": 5.0,
//!         "part_length_in": 6.0,
//!         "part_width_in": 4.0,
//!         "part_spacing_in": 6.0
//!     }),
//!     parameter_overrides: Default::default(),
//! };
//!
//! let result = run_calculation(&request, &CalcContext::default()).unwrap();
//! assert!(result.success);
//! assert!(result.outputs.is_some());
//! ```

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::CoreResult;
use crate::formulas::{calculate, Outputs};
use crate::inputs::{normalize, ConfigurationInput};
use crate::parameters::{effective_parameters, ParameterOverrides, Parameters};
use crate::validation::{validate, ValidationMessage};
use crate::vocabulary::ProductKey;

/// Version stamped into every result's metadata
pub const MODEL_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Telemetry
// ============================================================================

/// Optional hooks around one calculation. Every method defaults to a no-op.
pub trait CalcObserver: Send + Sync {
    fn on_calc_start(&self, _product: ProductKey) {}
    fn on_calc_success(&self, _duration_ms: f64) {}
    fn on_calc_error(&self, _message: &str) {}
}

/// Per-call context
#[derive(Clone, Copy, Default)]
pub struct CalcContext<'a> {
    /// Telemetry sink
    pub observer: Option<&'a dyn CalcObserver>,
    /// Fixed timestamp for reproducible metadata; `None` uses the clock
    pub timestamp: Option<DateTime<Utc>>,
}

impl<'a> CalcContext<'a> {
    pub fn with_observer(observer: &'a dyn CalcObserver) -> Self {
        CalcContext {
            observer: Some(observer),
            timestamp: None,
        }
    }

    fn notify(&self, f: impl FnOnce(&dyn CalcObserver)) {
        if let Some(observer) = self.observer {
            f(observer);
        }
    }
}

impl std::fmt::Debug for CalcContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalcContext")
            .field("observer", &self.observer.is_some())
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

// ============================================================================
// Request / Result
// ============================================================================

/// A calculation request as received from a caller.
///
/// ## JSON Example
///
/// ```json
/// {
///   "product": "belt_conveyor",
///   "inputs": { "conveyor_length_cc_in": 120.0, "belt_width_in": 18.0 },
///   "parameter_overrides": { "safety_factor": 2.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default)]
    pub product: ProductKey,
    /// Raw configuration; legacy field names are accepted
    pub inputs: Value,
    #[serde(default)]
    pub parameter_overrides: ParameterOverrides,
}

/// Identity of the model that produced a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcMetadata {
    pub model_key: String,
    pub model_version: String,
    pub calculated_at: DateTime<Utc>,
    pub product: ProductKey,
    pub run_id: Uuid,
}

/// Outcome of one calculation.
///
/// `outputs` is present even when `success` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub success: bool,
    pub outputs: Option<Outputs>,
    pub errors: Vec<ValidationMessage>,
    /// Warning- and info-severity messages
    pub warnings: Vec<ValidationMessage>,
    pub metadata: CalcMetadata,
}

impl CalculationResult {
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Normalize, validate and compute a raw configuration.
///
/// Returns `Err` only when the configuration cannot be interpreted at all;
/// validation findings travel inside the result.
pub fn run_calculation(request: &CalculationRequest, ctx: &CalcContext) -> CoreResult<CalculationResult> {
    let span = tracing::debug_span!("run_calculation", product = request.product.code());
    let _enter = span.enter();

    ctx.notify(|o| o.on_calc_start(request.product));
    let started = Instant::now();

    let input = match normalize(&request.inputs) {
        Ok(input) => input,
        Err(err) => {
            tracing::debug!(error = %err, "configuration rejected");
            ctx.notify(|o| o.on_calc_error(&err.to_string()));
            return Err(err);
        }
    };

    let result = calculate_configuration(&input, request.product, &request.parameter_overrides, ctx);

    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
    tracing::debug!(
        success = result.success,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        duration_ms,
        "calculation finished"
    );
    ctx.notify(|o| o.on_calc_success(duration_ms));
    Ok(result)
}

/// Validate and compute an already-typed configuration.
///
/// Infallible: every input yields a result.
pub fn calculate_configuration(
    input: &ConfigurationInput,
    product: ProductKey,
    overrides: &ParameterOverrides,
    ctx: &CalcContext,
) -> CalculationResult {
    let params: Parameters = effective_parameters(product, overrides, input);
    let report = validate(input, &params, Some(product));
    let outputs = calculate(input, &params);

    CalculationResult {
        success: report.is_valid(),
        outputs: Some(outputs),
        errors: report.errors,
        warnings: report.warnings,
        metadata: CalcMetadata {
            model_key: product.model_key().to_string(),
            model_version: MODEL_VERSION.to_string(),
            calculated_at: ctx.timestamp.unwrap_or_else(Utc::now),
            product,
            run_id: Uuid::new_v4(),
        },
    }
}
