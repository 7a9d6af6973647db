//! Coerce a raw JSON payload into a well-typed [`AnalysisInput`].
//!
//! Transport layers hand the engine whatever the client sent. Numbers may
//! arrive as JSON numbers, numeric strings or garbage; keys may be camelCase
//! or snake_case. Everything unusable becomes zero, so the engine only ever
//! sees finite Decimal values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::analysis::{AnalysisInput, FinancialPeriod, ScenarioAssumptions};
use crate::types::PercentagePoints;
use crate::{FinHealthError, FinHealthResult};

/// Operating range of one scenario lever, in percentage points.
#[derive(Debug, Clone, Copy)]
pub struct LeverRange {
    pub min: PercentagePoints,
    pub max: PercentagePoints,
}

pub const REVENUE_GROWTH_RANGE: LeverRange = LeverRange {
    min: dec!(-20),
    max: dec!(20),
};
pub const MARGIN_SHIFT_RANGE: LeverRange = LeverRange {
    min: dec!(-10),
    max: dec!(15),
};
pub const EFFICIENCY_GAIN_RANGE: LeverRange = LeverRange {
    min: dec!(-20),
    max: dec!(15),
};
pub const CASH_CONVERSION_RANGE: LeverRange = LeverRange {
    min: dec!(-20),
    max: dec!(15),
};

/// Sanitised input plus notes about anything that had to be adjusted.
#[derive(Debug, Clone)]
pub struct SanitizedInput {
    pub input: AnalysisInput,
    pub warnings: Vec<String>,
}

/// Sanitise a full `{periods, assumptions}` payload.
///
/// Only a non-object root is an error. A missing or empty `periods` array
/// yields an empty list, which the boundary rejects as empty input.
pub fn sanitize_payload(payload: &Value) -> FinHealthResult<SanitizedInput> {
    let root = payload.as_object().ok_or_else(|| FinHealthError::InvalidInput {
        field: "payload".into(),
        reason: "Expected a JSON object with `periods` and `assumptions`".into(),
    })?;

    let periods = match root.get("periods") {
        Some(Value::Array(items)) => sanitize_periods(items),
        _ => Vec::new(),
    };

    let mut warnings = Vec::new();
    let assumptions = match root.get("assumptions") {
        Some(Value::Object(map)) => sanitize_assumptions(map, &mut warnings),
        _ => ScenarioAssumptions::default(),
    };

    Ok(SanitizedInput {
        input: AnalysisInput {
            periods,
            assumptions,
        },
        warnings,
    })
}

/// Sanitise the period array. Non-object entries are skipped; labels are
/// numbered by position among the kept periods.
pub fn sanitize_periods(items: &[Value]) -> Vec<FinancialPeriod> {
    items
        .iter()
        .filter_map(Value::as_object)
        .enumerate()
        .map(|(i, map)| sanitize_period(map, i))
        .collect()
}

fn sanitize_period(map: &Map<String, Value>, index: usize) -> FinancialPeriod {
    let label = map
        .get("label")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Period {}", index + 1));

    FinancialPeriod {
        label,
        revenue: number_field(map, "revenue", "revenue"),
        cogs: number_field(map, "cogs", "cogs"),
        operating_expenses: number_field(map, "operatingExpenses", "operating_expenses"),
        net_income: number_field(map, "netIncome", "net_income"),
        assets: number_field(map, "assets", "assets"),
        liabilities: number_field(map, "liabilities", "liabilities"),
        cash: number_field(map, "cash", "cash"),
        free_cash_flow: number_field(map, "freeCashFlow", "free_cash_flow"),
    }
}

fn sanitize_assumptions(
    map: &Map<String, Value>,
    warnings: &mut Vec<String>,
) -> ScenarioAssumptions {
    let raw = ScenarioAssumptions {
        revenue_growth: lever_field(map, "revenueGrowth", "revenue_growth"),
        margin_shift: lever_field(map, "marginShift", "margin_shift"),
        efficiency_gain: lever_field(map, "efficiencyGain", "efficiency_gain"),
        cash_conversion: lever_field(map, "cashConversion", "cash_conversion"),
    };
    clamp_assumptions(&raw, warnings)
}

/// Clamp every lever to its operating range, noting each adjustment.
pub fn clamp_assumptions(
    assumptions: &ScenarioAssumptions,
    warnings: &mut Vec<String>,
) -> ScenarioAssumptions {
    ScenarioAssumptions {
        revenue_growth: clamp_lever(
            "revenueGrowth",
            assumptions.revenue_growth,
            REVENUE_GROWTH_RANGE,
            warnings,
        ),
        margin_shift: clamp_lever(
            "marginShift",
            assumptions.margin_shift,
            MARGIN_SHIFT_RANGE,
            warnings,
        ),
        efficiency_gain: clamp_lever(
            "efficiencyGain",
            assumptions.efficiency_gain,
            EFFICIENCY_GAIN_RANGE,
            warnings,
        ),
        cash_conversion: clamp_lever(
            "cashConversion",
            assumptions.cash_conversion,
            CASH_CONVERSION_RANGE,
            warnings,
        ),
    }
}

fn clamp_lever(
    name: &str,
    raw: PercentagePoints,
    range: LeverRange,
    warnings: &mut Vec<String>,
) -> PercentagePoints {
    let clamped = raw.clamp(range.min, range.max);
    if clamped != raw {
        warnings.push(format!(
            "{} of {} is outside [{}, {}]; clamped to {}.",
            name, raw, range.min, range.max, clamped
        ));
    }
    clamped
}

fn number_field(map: &Map<String, Value>, camel: &str, snake: &str) -> Decimal {
    map.get(camel)
        .or_else(|| map.get(snake))
        .map(coerce_decimal)
        .unwrap_or(Decimal::ZERO)
}

/// Coerce one JSON value to a Decimal, falling back to zero.
pub fn coerce_decimal(value: &Value) -> Decimal {
    try_decimal(value).unwrap_or(Decimal::ZERO)
}

/// Levers saturate instead of zeroing when a numeric value is too large for
/// Decimal, so the range clamp still applies and reports the adjustment.
fn lever_field(map: &Map<String, Value>, camel: &str, snake: &str) -> Decimal {
    map.get(camel)
        .or_else(|| map.get(snake))
        .and_then(|v| try_decimal(v).or_else(|| saturate_by_sign(v)))
        .unwrap_or(Decimal::ZERO)
}

fn try_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn saturate_by_sign(value: &Value) -> Option<Decimal> {
    let magnitude = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if !magnitude.is_finite() || magnitude.abs() < 1.0 {
        return None;
    }
    Some(if magnitude > 0.0 {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}
