//! Template-driven narrative and recommendation catalog.
//!
//! No free text is generated: the paragraph is one of three fixed templates
//! chosen by the overall-score tier, with metric values interpolated, and
//! each recommendation is a fixed catalog entry for a scored category.

use serde::{Deserialize, Serialize};

use super::health::{HealthCategory, HealthScores};
use super::metrics::TrailingMetrics;
use crate::config::TierCutoffs;
use crate::numeric::display_pct;

/// Number of recommendation sections in every result.
pub const RECOMMENDATION_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub highlight: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    Fragile,
    Stable,
    Strong,
}

impl HealthTier {
    pub fn from_overall(overall: rust_decimal::Decimal, cutoffs: &TierCutoffs) -> Self {
        if overall < cutoffs.fragile_below {
            HealthTier::Fragile
        } else if overall > cutoffs.strong_above {
            HealthTier::Strong
        } else {
            HealthTier::Stable
        }
    }
}

impl std::fmt::Display for HealthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Fragile => "fragile",
            Self::Stable => "stable",
            Self::Strong => "strong",
        };
        write!(f, "{}", s)
    }
}

/// Build the narrative paragraph for the scored analysis.
pub fn compose_narrative(
    scores: &HealthScores,
    metrics: &TrailingMetrics,
    risk_signals: &[String],
    cutoffs: &TierCutoffs,
) -> String {
    let overall = scores.overall.normalize();
    let cagr = display_pct(metrics.cagr);
    let margin = display_pct(metrics.net_margin);
    let runway = metrics.liquidity_ratio.round_dp(1).normalize();
    let burn = metrics.burn_multiple.round_dp(2).normalize();

    let opening = match HealthTier::from_overall(scores.overall, cutoffs) {
        HealthTier::Strong => format!(
            "Financial health is strong with an overall score of {overall}/100. \
             Revenue has compounded at {cagr}% per year with an average net margin of {margin}%, \
             and cash covers roughly {runway} months of operating expenses at a burn multiple of {burn}x."
        ),
        HealthTier::Stable => format!(
            "Financial health is stable with an overall score of {overall}/100. \
             Revenue has compounded at {cagr}% per year and the average net margin is {margin}%; \
             cash covers roughly {runway} months of operating expenses at a burn multiple of {burn}x, \
             leaving room to improve the weaker areas before they constrain the plan."
        ),
        HealthTier::Fragile => format!(
            "Financial health is fragile with an overall score of {overall}/100. \
             Revenue has compounded at {cagr}% per year against an average net margin of {margin}%, \
             and cash covers only about {runway} months of operating expenses at a burn multiple of {burn}x."
        ),
    };

    let risk_clause = match risk_signals.len() {
        0 => "No acute risk signals were detected.".to_string(),
        1 => "One risk signal needs attention.".to_string(),
        n => format!("{n} risk signals need attention."),
    };

    format!("{opening} {risk_clause}")
}

/// One recommendation for each of the three weakest categories.
pub fn compose_recommendations(scores: &HealthScores) -> Vec<Recommendation> {
    scores
        .weakest_categories()
        .into_iter()
        .take(RECOMMENDATION_COUNT)
        .map(catalog_entry)
        .collect()
}

fn catalog_entry(category: HealthCategory) -> Recommendation {
    let (title, highlight, bullets): (&str, &str, [&str; 3]) = match category {
        HealthCategory::Growth => (
            "Accelerate revenue growth",
            "Top-line momentum is the weakest part of the profile.",
            [
                "Double down on the acquisition channels with the shortest payback.",
                "Expand revenue from existing customers through upsell and pricing tiers.",
                "Set quarterly growth targets and review pipeline coverage monthly.",
            ],
        ),
        HealthCategory::Profitability => (
            "Improve unit economics",
            "Margins leave little buffer for shocks or reinvestment.",
            [
                "Review pricing against delivered value and competitor benchmarks.",
                "Renegotiate the largest supplier contracts to lower cost of goods sold.",
                "Cut or restructure operating expenses that do not drive revenue.",
            ],
        ),
        HealthCategory::Liquidity => (
            "Extend cash runway",
            "Cash on hand covers too few months of operating expenses.",
            [
                "Build a 13-week cash forecast and review it weekly.",
                "Tighten receivables collection and stretch payables within terms.",
                "Line up financing options well before runway drops below six months.",
            ],
        ),
        HealthCategory::Efficiency => (
            "Raise capital efficiency",
            "Cash burn is high relative to the new revenue it produces.",
            [
                "Tie each major spend line to a measurable revenue outcome.",
                "Pause growth programs whose payback exceeds eighteen months.",
                "Shift budget toward retention, which compounds without new burn.",
            ],
        ),
    };

    Recommendation {
        title: title.to_string(),
        highlight: highlight.to_string(),
        bullets: bullets.iter().map(|b| b.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn scores(overall: Decimal, g: Decimal, p: Decimal, l: Decimal, e: Decimal) -> HealthScores {
        HealthScores {
            overall,
            growth: g,
            profitability: p,
            liquidity: l,
            efficiency: e,
        }
    }

    fn metrics() -> TrailingMetrics {
        TrailingMetrics {
            cagr: dec!(0.5),
            net_margin: dec!(0.11666666),
            burn_multiple: dec!(1.25),
            leverage_ratio: dec!(0.3),
            liquidity_ratio: dec!(12),
            growth_velocity: dec!(0.5),
        }
    }

    #[test]
    fn test_tier_boundaries() {
        let cutoffs = TierCutoffs::default();
        assert_eq!(HealthTier::from_overall(dec!(39), &cutoffs), HealthTier::Fragile);
        assert_eq!(HealthTier::from_overall(dec!(40), &cutoffs), HealthTier::Stable);
        assert_eq!(HealthTier::from_overall(dec!(70), &cutoffs), HealthTier::Stable);
        assert_eq!(HealthTier::from_overall(dec!(71), &cutoffs), HealthTier::Strong);
    }

    #[test]
    fn test_narrative_interpolates_metrics() {
        let s = scores(dec!(82), dec!(100), dec!(70), dec!(65), dec!(79));
        let text = compose_narrative(&s, &metrics(), &[], &TierCutoffs::default());
        assert!(text.starts_with("Financial health is strong with an overall score of 82/100."));
        assert!(text.contains("compounded at 50% per year"), "{}", text);
        assert!(text.contains("net margin of 11.7%"), "{}", text);
        assert!(text.contains("12 months"), "{}", text);
        assert!(text.contains("1.25x"), "{}", text);
        assert!(text.ends_with("No acute risk signals were detected."));
    }

    #[test]
    fn test_narrative_counts_signals() {
        let s = scores(dec!(20), dec!(10), dec!(10), dec!(10), dec!(10));
        let signals = vec!["a".to_string(), "b".to_string()];
        let text = compose_narrative(&s, &metrics(), &signals, &TierCutoffs::default());
        assert!(text.starts_with("Financial health is fragile"));
        assert!(text.ends_with("2 risk signals need attention."));
    }

    #[test]
    fn test_three_weakest_categories_selected() {
        let s = scores(dec!(50), dec!(90), dec!(20), dec!(60), dec!(30));
        let recs = compose_recommendations(&s);
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Improve unit economics",
                "Raise capital efficiency",
                "Extend cash runway"
            ]
        );
        assert!(recs.iter().all(|r| r.bullets.len() == 3));
    }

    #[test]
    fn test_ties_follow_catalog_order() {
        let s = scores(dec!(0), dec!(0), dec!(0), dec!(0), dec!(0));
        let titles: Vec<String> = compose_recommendations(&s)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Accelerate revenue growth",
                "Improve unit economics",
                "Extend cash runway"
            ]
        );
    }
}
