use fin_health_core::{EngineConfig, FinHealthError};
use std::path::Path;
use tracing::debug;

use super::file::read_text;

/// Load an engine configuration from YAML (`.yml`/`.yaml`) or JSON.
///
/// Omitted sections keep their defaults; the result is validated before
/// it is returned.
pub fn load_engine_config(path: &str) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_text(path)?;
    let config = parse_engine_config(&canonical, &contents)?;
    debug!(path = %canonical.display(), "engine configuration loaded");
    Ok(config)
}

fn parse_engine_config(path: &Path, contents: &str) -> Result<EngineConfig, FinHealthError> {
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    );

    if is_yaml {
        let config: EngineConfig = serde_yaml::from_str(contents).map_err(|e| {
            FinHealthError::ConfigError(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    } else {
        EngineConfig::from_json_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_yaml_overrides_keep_defaults() {
        let yaml = "signals:\n  leverage_max: \"0.6\"\ntiers:\n  strong_above: \"75\"\n";
        let config = parse_engine_config(Path::new("engine.yaml"), yaml).unwrap();
        assert_eq!(config.signals.leverage_max, dec!(0.6));
        assert_eq!(config.tiers.strong_above, dec!(75));
        assert_eq!(config.weights, EngineConfig::default().weights);
    }

    #[test]
    fn test_json_config() {
        let json = r#"{"weights": {"growth": "1", "profitability": "1", "liquidity": "1", "efficiency": "1"}}"#;
        let config = parse_engine_config(Path::new("engine.json"), json).unwrap();
        assert_eq!(config.weights.growth, dec!(1));
    }

    #[test]
    fn test_invalid_yaml_config_rejected() {
        let yaml = "tiers:\n  fragile_below: \"80\"\n  strong_above: \"20\"\n";
        let err = parse_engine_config(Path::new("engine.yml"), yaml).unwrap_err();
        assert!(matches!(err, FinHealthError::InvalidInput { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let err = parse_engine_config(Path::new("engine.yaml"), "tiers: [1, 2").unwrap_err();
        assert!(matches!(err, FinHealthError::ConfigError(_)));
    }
}
