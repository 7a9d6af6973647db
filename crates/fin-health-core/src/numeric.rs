//! Overflow-safe Decimal helpers shared by the analysis pipeline.
//!
//! Decimal has no NaN or Infinity. The equivalent failure mode is overflow,
//! which panics on the plain operators, so every computation that can see
//! arbitrary input magnitudes goes through the checked variants here and
//! resolves a failed operation to zero.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

pub const HUNDRED: Decimal = dec!(100);

/// Safe division: returns zero when the denominator is zero or the quotient
/// overflows.
pub fn safe_divide(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
    }
}

/// Sum that reports overflow instead of panicking.
pub fn checked_sum<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

/// Arithmetic mean; `None` for an empty slice or on overflow.
pub fn checked_mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    checked_sum(values.iter().copied())?.checked_div(Decimal::from(values.len()))
}

/// Convert percentage points to a rate (5 -> 0.05).
pub fn pp_to_rate(points: Decimal) -> Decimal {
    points / HUNDRED
}

/// Round half away from zero to a whole number.
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rate rendered as a percentage with one decimal, for narrative text.
pub fn display_pct(rate: Decimal) -> Decimal {
    rate.saturating_mul(HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
