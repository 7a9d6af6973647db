use napi::Result as NapiResult;
use napi_derive::napi;

use fin_health_core::analysis;
use fin_health_core::sanitize::{sanitize_payload, SanitizedInput};
use fin_health_core::{EngineConfig, FinHealthError};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse and sanitise a `{periods, assumptions}` payload.
fn sanitize(input_json: &str) -> Result<SanitizedInput, FinHealthError> {
    let raw: serde_json::Value = serde_json::from_str(input_json)?;
    sanitize_payload(&raw)
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Full analysis. `config_json`, when given, overrides the engine defaults.
#[napi]
pub fn analyze_financials(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let sanitized = sanitize(&input_json).map_err(to_napi_error)?;
    let config = match config_json {
        Some(text) => EngineConfig::from_json_str(&text).map_err(to_napi_error)?,
        None => EngineConfig::default(),
    };
    let mut output = analysis::run_analysis(&sanitized.input, &config).map_err(to_napi_error)?;
    output.prepend_warnings(sanitized.warnings);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn trailing_metrics(input_json: String) -> NapiResult<String> {
    let sanitized = sanitize(&input_json).map_err(to_napi_error)?;
    let output =
        analysis::run_trailing_metrics(&sanitized.input.periods).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_scenario(input_json: String) -> NapiResult<String> {
    let sanitized = sanitize(&input_json).map_err(to_napi_error)?;
    let mut output = analysis::run_scenario(&sanitized.input).map_err(to_napi_error)?;
    output.prepend_warnings(sanitized.warnings);
    serde_json::to_string(&output).map_err(to_napi_error)
}
