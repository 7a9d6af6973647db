//! Health scores: each trailing metric is mapped onto [0, 100] by a linear
//! band, and the overall score is the weighted mean of the four categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metrics::TrailingMetrics;
use crate::config::{ScoreBand, ScoreWeights, ScoringBands};
use crate::numeric::{round_whole, HUNDRED};
use crate::types::Score;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScores {
    pub overall: Score,
    pub growth: Score,
    pub profitability: Score,
    pub liquidity: Score,
    pub efficiency: Score,
}

/// Scored categories, in catalog order. The order breaks ties wherever
/// categories are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCategory {
    Growth,
    Profitability,
    Liquidity,
    Efficiency,
}

impl HealthCategory {
    pub const ALL: [HealthCategory; 4] = [
        HealthCategory::Growth,
        HealthCategory::Profitability,
        HealthCategory::Liquidity,
        HealthCategory::Efficiency,
    ];
}

impl std::fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Growth => "growth",
            Self::Profitability => "profitability",
            Self::Liquidity => "liquidity",
            Self::Efficiency => "efficiency",
        };
        write!(f, "{}", s)
    }
}

impl HealthScores {
    pub fn category(&self, category: HealthCategory) -> Score {
        match category {
            HealthCategory::Growth => self.growth,
            HealthCategory::Profitability => self.profitability,
            HealthCategory::Liquidity => self.liquidity,
            HealthCategory::Efficiency => self.efficiency,
        }
    }

    /// Categories ordered weakest first; equal scores keep catalog order.
    pub fn weakest_categories(&self) -> Vec<HealthCategory> {
        let mut ranked = HealthCategory::ALL.to_vec();
        // sort_by_key is stable
        ranked.sort_by_key(|c| self.category(*c));
        ranked
    }
}

/// Score the trailing metrics against the configured bands and weights.
pub fn score_health(
    metrics: &TrailingMetrics,
    bands: &ScoringBands,
    weights: &ScoreWeights,
) -> HealthScores {
    let growth = band_score(metrics.cagr, &bands.growth);
    let profitability = band_score(metrics.net_margin, &bands.profitability);
    let liquidity = band_score(metrics.liquidity_ratio, &bands.liquidity);
    let efficiency = band_score(metrics.burn_multiple, &bands.efficiency);

    let overall = weighted_overall(
        [
            (growth, weights.growth),
            (profitability, weights.profitability),
            (liquidity, weights.liquidity),
            (efficiency, weights.efficiency),
        ],
        weights,
    );

    HealthScores {
        overall,
        growth,
        profitability,
        liquidity,
        efficiency,
    }
}

/// Linear interpolation from `bad` (0) to `good` (100), clamped and rounded.
///
/// The metric is clamped into the band before interpolating, so no input
/// magnitude can overflow and the mapping stays monotone.
fn band_score(value: Decimal, band: &ScoreBand) -> Score {
    let span = match band.good.checked_sub(band.bad) {
        Some(span) if !span.is_zero() => span,
        _ => return Decimal::ZERO,
    };
    let (low, high) = if band.bad < band.good {
        (band.bad, band.good)
    } else {
        (band.good, band.bad)
    };
    let bounded = value.clamp(low, high);
    let raw = (bounded - band.bad) / span * HUNDRED;
    round_whole(raw).clamp(Decimal::ZERO, HUNDRED)
}

fn weighted_overall(components: [(Score, Decimal); 4], weights: &ScoreWeights) -> Score {
    let total_weight = weights.total();
    if total_weight <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let weighted = components
        .iter()
        .try_fold(Decimal::ZERO, |acc, (score, w)| {
            acc.checked_add(score.checked_mul(*w)?)
        })
        .and_then(|sum| sum.checked_div(total_weight))
        .unwrap_or(Decimal::ZERO);
    round_whole(weighted).clamp(Decimal::ZERO, HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn metrics(
        cagr: Decimal,
        net_margin: Decimal,
        liquidity: Decimal,
        burn: Decimal,
    ) -> TrailingMetrics {
        TrailingMetrics {
            cagr,
            net_margin,
            burn_multiple: burn,
            leverage_ratio: Decimal::ZERO,
            liquidity_ratio: liquidity,
            growth_velocity: Decimal::ZERO,
        }
    }

    fn score(m: &TrailingMetrics) -> HealthScores {
        score_health(m, &ScoringBands::default(), &ScoreWeights::default())
    }

    #[test]
    fn test_band_endpoints() {
        let best = score(&metrics(dec!(0.40), dec!(0.25), dec!(18), dec!(0.5)));
        assert_eq!(best.growth, dec!(100));
        assert_eq!(best.profitability, dec!(100));
        assert_eq!(best.liquidity, dec!(100));
        assert_eq!(best.efficiency, dec!(100));
        assert_eq!(best.overall, dec!(100));

        let worst = score(&metrics(dec!(-0.10), dec!(-0.20), dec!(1), dec!(4)));
        assert_eq!(worst.overall, Decimal::ZERO);
        assert_eq!(worst.efficiency, Decimal::ZERO);
    }

    #[test]
    fn test_midpoints_and_rounding() {
        // CAGR 0.15 is halfway through [-0.10, 0.40]
        let s = score(&metrics(dec!(0.15), dec!(0.025), dec!(9.5), dec!(2.25)));
        assert_eq!(s.growth, dec!(50));
        assert_eq!(s.profitability, dec!(50));
        assert_eq!(s.liquidity, dec!(50));
        assert_eq!(s.efficiency, dec!(50));
        assert_eq!(s.overall, dec!(50));
    }

    #[test]
    fn test_scores_clamped_outside_band() {
        let s = score(&metrics(dec!(9), dec!(-5), dec!(60), dec!(50)));
        assert_eq!(s.growth, dec!(100));
        assert_eq!(s.profitability, Decimal::ZERO);
        assert_eq!(s.liquidity, dec!(100));
        assert_eq!(s.efficiency, Decimal::ZERO);
    }

    #[test]
    fn test_overall_weighted_mean() {
        // growth 100, profitability 0, liquidity 100, efficiency 0
        let s = score(&metrics(dec!(1), dec!(-1), dec!(40), dec!(10)));
        // 0.3*100 + 0.2*100 = 50
        assert_eq!(s.overall, dec!(50));
    }

    #[test]
    fn test_efficiency_is_inverted() {
        let low_burn = score(&metrics(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, dec!(1)));
        let high_burn = score(&metrics(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, dec!(3)));
        assert!(low_burn.efficiency > high_burn.efficiency);
    }

    #[test]
    fn test_monotone_in_each_metric() {
        let mut previous = Decimal::MIN;
        for step in 0..=60 {
            let cagr = dec!(-0.2) + Decimal::from(step) * dec!(0.01);
            let s = score(&metrics(cagr, Decimal::ZERO, dec!(6), dec!(2)));
            assert!(s.growth >= previous);
            previous = s.growth;
        }
    }

    #[test]
    fn test_extreme_metric_values_stay_bounded() {
        let s = score(&metrics(Decimal::MAX, Decimal::MIN, Decimal::MAX, Decimal::MIN));
        for v in [s.overall, s.growth, s.profitability, s.liquidity, s.efficiency] {
            assert!(v >= Decimal::ZERO && v <= dec!(100));
        }
    }

    #[test]
    fn test_weakest_categories_tie_break_in_catalog_order() {
        let s = HealthScores {
            overall: dec!(50),
            growth: dec!(40),
            profitability: dec!(70),
            liquidity: dec!(40),
            efficiency: dec!(10),
        };
        assert_eq!(
            s.weakest_categories(),
            vec![
                HealthCategory::Efficiency,
                HealthCategory::Growth,
                HealthCategory::Liquidity,
                HealthCategory::Profitability,
            ]
        );
    }
}
