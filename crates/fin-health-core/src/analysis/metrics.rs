//! Trailing metrics derived from the historical period sequence.
//!
//! Every metric is total: a zero denominator or an overflowing intermediate
//! resolves that metric to zero instead of failing the analysis.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::period::FinancialPeriod;
use crate::numeric::{checked_mean, checked_sum, safe_divide};
use crate::types::{Multiple, Rate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);
/// Floor for net new revenue so flat or shrinking revenue cannot blow up the
/// burn multiple.
const MIN_NEW_REVENUE: Decimal = Decimal::ONE;
/// Floor for monthly operating expense in the runway calculation.
const MIN_MONTHLY_OPEX: Decimal = Decimal::ONE;
const BURN_MULTIPLE_CAP: Multiple = dec!(50);
const LEVERAGE_CAP: Rate = dec!(5);
const RUNWAY_CAP_MONTHS: Decimal = dec!(60);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailingMetrics {
    /// Compound annual revenue growth, first to last period
    pub cagr: Rate,
    /// Mean net margin over periods with non-zero revenue
    pub net_margin: Rate,
    /// Cumulative burn / net new revenue, in [0, 50]
    pub burn_multiple: Multiple,
    /// Latest liabilities / assets, in [0, 5]
    pub leverage_ratio: Rate,
    /// Months of runway at average operating expense, in [0, 60]
    pub liquidity_ratio: Decimal,
    /// Mean period-over-period revenue growth
    pub growth_velocity: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the trailing metrics for a chronological, non-empty period slice.
///
/// An empty slice yields all-zero metrics.
pub fn calculate_trailing_metrics(periods: &[FinancialPeriod]) -> TrailingMetrics {
    TrailingMetrics {
        cagr: compute_cagr(periods).unwrap_or(Decimal::ZERO),
        net_margin: average_net_margin(periods).unwrap_or(Decimal::ZERO),
        burn_multiple: burn_multiple(periods).unwrap_or(Decimal::ZERO),
        leverage_ratio: leverage_ratio(periods).unwrap_or(Decimal::ZERO),
        liquidity_ratio: liquidity_ratio(periods).unwrap_or(Decimal::ZERO),
        growth_velocity: growth_velocity(periods).unwrap_or(Decimal::ZERO),
    }
}

/// Number of periods whose revenue is zero and therefore excluded from the
/// net margin average.
pub fn zero_revenue_periods(periods: &[FinancialPeriod]) -> usize {
    periods.iter().filter(|p| p.revenue.is_zero()).count()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// CAGR = (ending / beginning)^(1/years) - 1, with one year between
/// consecutive periods.
fn compute_cagr(periods: &[FinancialPeriod]) -> Option<Rate> {
    let (first, last) = (periods.first()?, periods.last()?);
    if periods.len() < 2 || first.revenue <= Decimal::ZERO || last.revenue <= Decimal::ZERO {
        return None;
    }

    let years = Decimal::from(periods.len() - 1);
    let ratio = last.revenue.checked_div(first.revenue)?;
    let growth_factor = if years == Decimal::ONE {
        ratio
    } else {
        ratio.checked_powd(Decimal::ONE / years)?
    };
    growth_factor.checked_sub(Decimal::ONE)
}

fn average_net_margin(periods: &[FinancialPeriod]) -> Option<Rate> {
    let margins: Vec<Rate> = periods
        .iter()
        .filter(|p| !p.revenue.is_zero())
        .map(|p| p.net_income.checked_div(p.revenue))
        .collect::<Option<_>>()?;
    checked_mean(&margins)
}

fn burn_multiple(periods: &[FinancialPeriod]) -> Option<Multiple> {
    let (first, last) = (periods.first()?, periods.last()?);

    let total_burn = checked_sum(
        periods
            .iter()
            .map(|p| (-p.free_cash_flow).max(Decimal::ZERO)),
    )?;
    let new_revenue = last
        .revenue
        .checked_sub(first.revenue)?
        .max(MIN_NEW_REVENUE);

    Some(safe_divide(total_burn, new_revenue).clamp(Decimal::ZERO, BURN_MULTIPLE_CAP))
}

fn leverage_ratio(periods: &[FinancialPeriod]) -> Option<Rate> {
    let last = periods.last()?;
    if last.assets <= Decimal::ZERO {
        return None;
    }
    Some(safe_divide(last.liabilities, last.assets).clamp(Decimal::ZERO, LEVERAGE_CAP))
}

fn liquidity_ratio(periods: &[FinancialPeriod]) -> Option<Decimal> {
    let last = periods.last()?;
    let opex: Vec<Decimal> = periods.iter().map(|p| p.operating_expenses).collect();
    let monthly_opex = (checked_mean(&opex)? / MONTHS_PER_YEAR).max(MIN_MONTHLY_OPEX);
    Some(safe_divide(last.cash, monthly_opex).clamp(Decimal::ZERO, RUNWAY_CAP_MONTHS))
}

fn growth_velocity(periods: &[FinancialPeriod]) -> Option<Rate> {
    if periods.len() < 2 {
        return None;
    }
    let rates: Vec<Rate> = periods
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (pair[0].revenue, pair[1].revenue);
            if prev.is_zero() {
                return None;
            }
            curr.checked_sub(prev)?.checked_div(prev)
        })
        .collect::<Option<_>>()?;
    checked_mean(&rates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
