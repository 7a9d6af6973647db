use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::health::{score_health, HealthScores};
use super::metrics::{calculate_trailing_metrics, zero_revenue_periods, TrailingMetrics};
use super::narrative::{compose_narrative, compose_recommendations, Recommendation};
use super::period::{FinancialPeriod, ScenarioAssumptions};
use super::projection::{effective_rates, project_scenario, ProjectionRates, ScenarioYear};
use super::signals::detect_risk_signals;
use crate::config::EngineConfig;
use crate::types::{with_metadata, ComputationOutput};
use crate::{FinHealthError, FinHealthResult};

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub periods: Vec<FinancialPeriod>,
    #[serde(default)]
    pub assumptions: ScenarioAssumptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub metrics: TrailingMetrics,
    pub scenario: Vec<ScenarioYear>,
    pub health_scores: HealthScores,
    pub risk_signals: Vec<String>,
    pub narrative: String,
    pub recommendations: Vec<Recommendation>,
}

/// Projection-only output: the effective rates and the projected years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutput {
    pub rates: ProjectionRates,
    pub years: Vec<ScenarioYear>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full pipeline with the default engine configuration.
pub fn analyze(periods: &[FinancialPeriod], assumptions: &ScenarioAssumptions) -> AnalysisResult {
    analyze_with_config(periods, assumptions, &EngineConfig::default())
}

/// Run the full pipeline. Pure and infallible: the same inputs always give
/// the same result, and an empty period slice is treated as one all-zero
/// period so the output shape is always complete.
pub fn analyze_with_config(
    periods: &[FinancialPeriod],
    assumptions: &ScenarioAssumptions,
    config: &EngineConfig,
) -> AnalysisResult {
    let placeholder;
    let last = match periods.last() {
        Some(last) => last,
        None => {
            placeholder = FinancialPeriod::empty("Period 1");
            &placeholder
        }
    };

    let metrics = calculate_trailing_metrics(periods);
    let scenario = project_scenario(last, &metrics, assumptions);
    let health_scores = score_health(&metrics, &config.scoring, &config.weights);
    let risk_signals = detect_risk_signals(&metrics, periods, &config.signals);
    let narrative = compose_narrative(&health_scores, &metrics, &risk_signals, &config.tiers);
    let recommendations = compose_recommendations(&health_scores);

    AnalysisResult {
        metrics,
        scenario,
        health_scores,
        risk_signals,
        narrative,
        recommendations,
    }
}

/// Validated analysis wrapped in the standard computation envelope.
///
/// Rejects an empty period list and an invalid configuration; everything
/// past validation is the infallible pipeline.
pub fn run_analysis(
    input: &AnalysisInput,
    config: &EngineConfig,
) -> FinHealthResult<ComputationOutput<AnalysisResult>> {
    let start = Instant::now();

    config.validate()?;
    if input.periods.is_empty() {
        return Err(FinHealthError::EmptyInput);
    }

    let mut warnings: Vec<String> = Vec::new();
    let periods = &input.periods;

    match periods.as_slice() {
        [_] => warnings.push(
            "Only one period supplied; CAGR and growth velocity default to zero.".into(),
        ),
        [first, .., _] if first.revenue <= Decimal::ZERO => warnings.push(
            "First-period revenue is not positive; CAGR is undefined and set to zero.".into(),
        ),
        [.., last] if last.revenue <= Decimal::ZERO => warnings.push(
            "Latest-period revenue is not positive; CAGR is undefined and set to zero.".into(),
        ),
        _ => {}
    }

    let excluded = zero_revenue_periods(periods);
    if excluded > 0 {
        warnings.push(format!(
            "{} period(s) with zero revenue excluded from the net margin average.",
            excluded
        ));
    }

    let result = analyze_with_config(periods, &input.assumptions, config);

    debug!(
        periods = periods.len(),
        overall = %result.health_scores.overall,
        risk_signals = result.risk_signals.len(),
        "financial health analysis complete"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trailing metrics, 3-year compounding scenario, banded health scores and rule-based risk signals",
        config,
        warnings,
        elapsed,
        result,
    ))
}

/// Trailing metrics only, wrapped in the standard envelope.
pub fn run_trailing_metrics(
    periods: &[FinancialPeriod],
) -> FinHealthResult<ComputationOutput<TrailingMetrics>> {
    let start = Instant::now();
    if periods.is_empty() {
        return Err(FinHealthError::EmptyInput);
    }

    let metrics = calculate_trailing_metrics(periods);
    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "periods": periods.len(),
        "period_spacing": "one year between consecutive periods",
        "zero_revenue_periods_excluded_from_margin": zero_revenue_periods(periods),
    });

    Ok(with_metadata(
        "Trailing metrics (CAGR, net margin, burn multiple, leverage, runway, growth velocity)",
        &assumptions,
        Vec::new(),
        elapsed,
        metrics,
    ))
}

/// Projection only, wrapped in the standard envelope.
pub fn run_scenario(input: &AnalysisInput) -> FinHealthResult<ComputationOutput<ScenarioOutput>> {
    let start = Instant::now();
    let last = input.periods.last().ok_or(FinHealthError::EmptyInput)?;

    let metrics = calculate_trailing_metrics(&input.periods);
    let output = ScenarioOutput {
        rates: effective_rates(last, &metrics, &input.assumptions),
        years: project_scenario(last, &metrics, &input.assumptions),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "3-year compounding projection from trailing growth velocity and net margin",
        &input.assumptions,
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
