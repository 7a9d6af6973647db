use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use fin_health_core::analysis::{self, ScenarioAssumptions};
use fin_health_core::sanitize::{self, SanitizedInput};

use crate::input;

/// Scenario lever overrides, in percentage points
#[derive(Args, Default)]
pub struct LeverArgs {
    /// Revenue growth delta (pp, -20..20)
    #[arg(long, allow_negative_numbers = true)]
    pub revenue_growth: Option<Decimal>,

    /// Net margin shift (pp, -10..15)
    #[arg(long, allow_negative_numbers = true)]
    pub margin_shift: Option<Decimal>,

    /// Efficiency gain (pp, -20..15)
    #[arg(long, allow_negative_numbers = true)]
    pub efficiency_gain: Option<Decimal>,

    /// Cash conversion improvement (pp, -20..15)
    #[arg(long, allow_negative_numbers = true)]
    pub cash_conversion: Option<Decimal>,
}

impl LeverArgs {
    fn is_empty(&self) -> bool {
        self.revenue_growth.is_none()
            && self.margin_shift.is_none()
            && self.efficiency_gain.is_none()
            && self.cash_conversion.is_none()
    }

    /// Layer the flags over the payload's assumptions.
    fn apply(&self, base: &ScenarioAssumptions) -> ScenarioAssumptions {
        ScenarioAssumptions {
            revenue_growth: self.revenue_growth.unwrap_or(base.revenue_growth),
            margin_shift: self.margin_shift.unwrap_or(base.margin_shift),
            efficiency_gain: self.efficiency_gain.unwrap_or(base.efficiency_gain),
            cash_conversion: self.cash_conversion.unwrap_or(base.cash_conversion),
        }
    }
}

/// Arguments for the full analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file with `periods` and optional `assumptions`
    #[arg(long)]
    pub input: Option<String>,

    /// Engine configuration file (YAML or JSON)
    #[arg(long)]
    pub config: Option<String>,

    #[command(flatten)]
    pub levers: LeverArgs,
}

/// Arguments for trailing metrics
#[derive(Args)]
pub struct MetricsArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the scenario projection
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub levers: LeverArgs,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = match args.config {
        Some(ref path) => input::config::load_engine_config(path)?,
        None => Default::default(),
    };
    let mut sanitized = load_payload(args.input.as_deref(), "analysis")?;
    override_levers(&mut sanitized, &args.levers);

    let mut result = analysis::run_analysis(&sanitized.input, &config)?;
    result.prepend_warnings(sanitized.warnings);
    Ok(serde_json::to_value(result)?)
}

pub fn run_metrics(args: MetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sanitized = load_payload(args.input.as_deref(), "trailing metrics")?;
    let result = analysis::run_trailing_metrics(&sanitized.input.periods)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_scenario(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut sanitized = load_payload(args.input.as_deref(), "scenario projection")?;
    override_levers(&mut sanitized, &args.levers);

    let mut result = analysis::run_scenario(&sanitized.input)?;
    result.prepend_warnings(sanitized.warnings);
    Ok(serde_json::to_value(result)?)
}

/// Read the raw payload from `--input` or stdin and sanitise it.
fn load_payload(
    path: Option<&str>,
    purpose: &str,
) -> Result<SanitizedInput, Box<dyn std::error::Error>> {
    let raw: Value = if let Some(path) = path {
        input::file::read_json_value(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err(format!("--input <file.json> or stdin required for {}", purpose).into());
    };

    let sanitized = sanitize::sanitize_payload(&raw)?;
    debug!(
        periods = sanitized.input.periods.len(),
        adjustments = sanitized.warnings.len(),
        "payload sanitised"
    );
    Ok(sanitized)
}

fn override_levers(sanitized: &mut SanitizedInput, levers: &LeverArgs) {
    if levers.is_empty() {
        return;
    }
    let requested = levers.apply(&sanitized.input.assumptions);
    sanitized.input.assumptions = sanitize::clamp_assumptions(&requested, &mut sanitized.warnings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lever_flags_override_payload() {
        let levers = LeverArgs {
            revenue_growth: Some(dec!(5)),
            cash_conversion: Some(dec!(-3)),
            ..Default::default()
        };
        let base = ScenarioAssumptions {
            revenue_growth: dec!(1),
            margin_shift: dec!(2),
            efficiency_gain: dec!(3),
            cash_conversion: dec!(4),
        };
        let merged = levers.apply(&base);
        assert_eq!(merged.revenue_growth, dec!(5));
        assert_eq!(merged.margin_shift, dec!(2));
        assert_eq!(merged.efficiency_gain, dec!(3));
        assert_eq!(merged.cash_conversion, dec!(-3));
    }

    #[test]
    fn test_override_clamps_and_warns() {
        let mut sanitized =
            sanitize::sanitize_payload(&serde_json::json!({"periods": [{"revenue": 10}]})).unwrap();
        let levers = LeverArgs {
            margin_shift: Some(dec!(40)),
            ..Default::default()
        };
        override_levers(&mut sanitized, &levers);
        assert_eq!(sanitized.input.assumptions.margin_shift, dec!(15));
        assert_eq!(sanitized.warnings.len(), 1);
    }
}
