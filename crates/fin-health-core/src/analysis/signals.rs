//! Risk signal rules. Each rule is evaluated independently; the output keeps
//! rule order, so the list is stable for a given input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metrics::TrailingMetrics;
use super::period::FinancialPeriod;
use crate::config::SignalThresholds;
use crate::numeric::display_pct;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskRule {
    NegativeMargin,
    OverLeverage,
    ShortRunway,
    InefficientGrowth,
    WorseningCashTrajectory,
}

impl RiskRule {
    /// Evaluation order, which is also output order.
    pub const ALL: [RiskRule; 5] = [
        RiskRule::NegativeMargin,
        RiskRule::OverLeverage,
        RiskRule::ShortRunway,
        RiskRule::InefficientGrowth,
        RiskRule::WorseningCashTrajectory,
    ];

    pub fn fires(
        &self,
        metrics: &TrailingMetrics,
        periods: &[FinancialPeriod],
        thresholds: &SignalThresholds,
    ) -> bool {
        match self {
            Self::NegativeMargin => metrics.net_margin < thresholds.net_margin_floor,
            Self::OverLeverage => metrics.leverage_ratio > thresholds.leverage_max,
            Self::ShortRunway => metrics.liquidity_ratio < thresholds.runway_min_months,
            Self::InefficientGrowth => metrics.burn_multiple > thresholds.burn_multiple_max,
            Self::WorseningCashTrajectory => cash_trajectory_worsening(periods),
        }
    }

    pub fn message(&self, thresholds: &SignalThresholds) -> String {
        match self {
            Self::NegativeMargin if thresholds.net_margin_floor.is_zero() => {
                "Net margin is negative: the business is losing money on average across the reported periods."
                    .to_string()
            }
            Self::NegativeMargin => format!(
                "Net margin is below {}%: the average margin across the reported periods is under the configured floor.",
                display_pct(thresholds.net_margin_floor)
            ),
            Self::OverLeverage => format!(
                "Leverage is elevated: liabilities exceed {}% of assets, limiting room to absorb shocks.",
                display_pct(thresholds.leverage_max)
            ),
            Self::ShortRunway => format!(
                "Cash runway is short: less than {} months of operating expenses are covered by cash on hand.",
                thresholds.runway_min_months.normalize()
            ),
            Self::InefficientGrowth => format!(
                "Growth is capital-inefficient: the burn multiple is above {}x, so each dollar of new revenue costs more than {} dollars of cash.",
                thresholds.burn_multiple_max.normalize(),
                thresholds.burn_multiple_max.normalize()
            ),
            Self::WorseningCashTrajectory => {
                "Cash trajectory is worsening: free cash flow was negative in each of the last two periods and declined further."
                    .to_string()
            }
        }
    }
}

/// Evaluate every rule and collect the messages of those that fire.
///
/// An empty list means no acute risk was detected.
pub fn detect_risk_signals(
    metrics: &TrailingMetrics,
    periods: &[FinancialPeriod],
    thresholds: &SignalThresholds,
) -> Vec<String> {
    RiskRule::ALL
        .iter()
        .filter(|rule| rule.fires(metrics, periods, thresholds))
        .map(|rule| rule.message(thresholds))
        .collect()
}

fn cash_trajectory_worsening(periods: &[FinancialPeriod]) -> bool {
    match periods {
        [.., prior, latest] => {
            prior.free_cash_flow < Decimal::ZERO
                && latest.free_cash_flow < Decimal::ZERO
                && latest.free_cash_flow < prior.free_cash_flow
        }
        _ => false,
    }
}
