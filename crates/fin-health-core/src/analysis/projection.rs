use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metrics::TrailingMetrics;
use super::period::{FinancialPeriod, ScenarioAssumptions};
use crate::numeric::{pp_to_rate, safe_divide};
use crate::types::{Money, Rate};

/// Projection horizon. Fixed so the output shape never changes.
pub const SCENARIO_HORIZON_YEARS: u32 = 3;

/// Revenue cannot shrink by more than 100% in a year.
const MIN_GROWTH_RATE: Rate = Decimal::NEGATIVE_ONE;

/// One projected year beyond the latest historical period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioYear {
    /// 1-based offset from the last historical period
    pub year: u32,
    pub revenue: Money,
    pub net_income: Money,
    pub free_cash_flow: Money,
}

/// The effective rates a projection compounds with, after the levers are
/// applied to the trailing trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRates {
    pub growth_rate: Rate,
    pub net_margin: Rate,
    pub fcf_conversion: Rate,
}

/// Resolve the effective growth, margin and cash conversion rates.
pub fn effective_rates(
    last: &FinancialPeriod,
    metrics: &TrailingMetrics,
    assumptions: &ScenarioAssumptions,
) -> ProjectionRates {
    let growth_rate = metrics
        .growth_velocity
        .saturating_add(pp_to_rate(assumptions.revenue_growth))
        .max(MIN_GROWTH_RATE);

    let net_margin = metrics
        .net_margin
        .saturating_add(pp_to_rate(assumptions.margin_shift))
        .clamp(Decimal::NEGATIVE_ONE, Decimal::ONE);

    let lever = pp_to_rate(assumptions.efficiency_gain)
        .saturating_add(pp_to_rate(assumptions.cash_conversion));
    let fcf_conversion = safe_divide(last.free_cash_flow, last.revenue)
        .saturating_add(lever)
        .clamp(Decimal::NEGATIVE_ONE, Decimal::ONE);

    ProjectionRates {
        growth_rate,
        net_margin,
        fcf_conversion,
    }
}

/// Compound the last historical period forward by the scenario horizon.
///
/// Revenue saturates at the Decimal bounds instead of overflowing, which keeps
/// projected revenue monotone in the growth lever.
pub fn project_scenario(
    last: &FinancialPeriod,
    metrics: &TrailingMetrics,
    assumptions: &ScenarioAssumptions,
) -> Vec<ScenarioYear> {
    let rates = effective_rates(last, metrics, assumptions);
    let growth_factor = Decimal::ONE.saturating_add(rates.growth_rate);

    let mut revenue = last.revenue;
    (1..=SCENARIO_HORIZON_YEARS)
        .map(|year| {
            revenue = revenue.saturating_mul(growth_factor);
            ScenarioYear {
                year,
                revenue,
                net_income: revenue.saturating_mul(rates.net_margin),
                free_cash_flow: revenue.saturating_mul(rates.fcf_conversion),
            }
        })
        .collect()
}
