//! Tunable engine parameters: scoring bands, category weights, risk-signal
//! thresholds and narrative tier cutoffs.
//!
//! Every section deserialises with defaults, so a config file only needs to
//! name the values it overrides.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::checked_sum;
use crate::types::{Multiple, Rate, Score};
use crate::{FinHealthError, FinHealthResult};

/// Linear scoring band: `bad` maps to 0, `good` maps to 100.
///
/// `good` may sit below `bad` for metrics where lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub bad: Decimal,
    pub good: Decimal,
}

impl ScoreBand {
    pub const fn new(bad: Decimal, good: Decimal) -> Self {
        Self { bad, good }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringBands {
    /// CAGR band
    pub growth: ScoreBand,
    /// Net margin band
    pub profitability: ScoreBand,
    /// Runway band, in months
    pub liquidity: ScoreBand,
    /// Burn multiple band (inverted)
    pub efficiency: ScoreBand,
}

impl Default for ScoringBands {
    fn default() -> Self {
        Self {
            growth: ScoreBand::new(dec!(-0.10), dec!(0.40)),
            profitability: ScoreBand::new(dec!(-0.20), dec!(0.25)),
            liquidity: ScoreBand::new(dec!(1), dec!(18)),
            efficiency: ScoreBand::new(dec!(4), dec!(0.5)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub growth: Decimal,
    pub profitability: Decimal,
    pub liquidity: Decimal,
    pub efficiency: Decimal,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            growth: dec!(0.3),
            profitability: dec!(0.3),
            liquidity: dec!(0.2),
            efficiency: dec!(0.2),
        }
    }
}

impl ScoreWeights {
    /// Sum of the four weights; zero if the sum overflows.
    pub fn total(&self) -> Decimal {
        checked_sum([self.growth, self.profitability, self.liquidity, self.efficiency])
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// Net margin below this is flagged
    pub net_margin_floor: Rate,
    /// Liabilities / assets above this is flagged
    pub leverage_max: Rate,
    /// Runway (months) below this is flagged
    pub runway_min_months: Decimal,
    /// Burn multiple above this is flagged
    pub burn_multiple_max: Multiple,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            net_margin_floor: Decimal::ZERO,
            leverage_max: dec!(0.7),
            runway_min_months: dec!(3),
            burn_multiple_max: dec!(2),
        }
    }
}

/// Overall-score cutoffs for the narrative: `< fragile_below` is fragile,
/// `> strong_above` is strong, everything between is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierCutoffs {
    pub fragile_below: Score,
    pub strong_above: Score,
}

impl Default for TierCutoffs {
    fn default() -> Self {
        Self {
            fragile_below: dec!(40),
            strong_above: dec!(70),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringBands,
    pub weights: ScoreWeights,
    pub signals: SignalThresholds,
    pub tiers: TierCutoffs,
}

impl EngineConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(text: &str) -> FinHealthResult<Self> {
        let config: EngineConfig = serde_json::from_str(text)
            .map_err(|e| FinHealthError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would break score monotonicity or bounds.
    pub fn validate(&self) -> FinHealthResult<()> {
        let bands = [
            ("scoring.growth", &self.scoring.growth),
            ("scoring.profitability", &self.scoring.profitability),
            ("scoring.liquidity", &self.scoring.liquidity),
            ("scoring.efficiency", &self.scoring.efficiency),
        ];
        for (field, band) in bands {
            if band.bad == band.good {
                return Err(FinHealthError::InvalidInput {
                    field: field.into(),
                    reason: "bad and good reference points must differ".into(),
                });
            }
        }

        let weights = [
            ("weights.growth", self.weights.growth),
            ("weights.profitability", self.weights.profitability),
            ("weights.liquidity", self.weights.liquidity),
            ("weights.efficiency", self.weights.efficiency),
        ];
        for (field, w) in weights {
            if w < Decimal::ZERO || w > dec!(1000) {
                return Err(FinHealthError::InvalidInput {
                    field: field.into(),
                    reason: "Weight must be in [0, 1000]".into(),
                });
            }
        }
        if self.weights.total() <= Decimal::ZERO {
            return Err(FinHealthError::InvalidInput {
                field: "weights".into(),
                reason: "Sum of weights must be positive".into(),
            });
        }

        if self.tiers.fragile_below > self.tiers.strong_above {
            return Err(FinHealthError::InvalidInput {
                field: "tiers".into(),
                reason: "fragile_below must not exceed strong_above".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert_eq!(ScoreWeights::default().total(), dec!(1.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json_str(r#"{"signals": {"leverage_max": "0.8"}}"#).unwrap();
        assert_eq!(config.signals.leverage_max, dec!(0.8));
        assert_eq!(config.signals.runway_min_months, dec!(3));
        assert_eq!(config.scoring, ScoringBands::default());
    }

    #[test]
    fn test_degenerate_band_rejected() {
        let mut config = EngineConfig::default();
        config.scoring.liquidity = ScoreBand::new(dec!(6), dec!(6));
        match config.validate() {
            Err(FinHealthError::InvalidInput { field, .. }) => {
                assert_eq!(field, "scoring.liquidity")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_weights_rejected() {
        let mut config = EngineConfig::default();
        config.weights = ScoreWeights {
            growth: Decimal::ZERO,
            profitability: Decimal::ZERO,
            liquidity: Decimal::ZERO,
            efficiency: Decimal::ZERO,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_tiers_rejected() {
        let mut config = EngineConfig::default();
        config.tiers.fragile_below = dec!(80);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            EngineConfig::from_json_str("{not json"),
            Err(FinHealthError::ConfigError(_))
        ));
    }
}
