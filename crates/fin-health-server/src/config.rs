use anyhow::{Context, Result};
use fin_health_core::EngineConfig;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: String,
    pub engine_config_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            engine_config_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            addr: non_empty("FIN_HEALTH_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            engine_config_path: non_empty("FIN_HEALTH_CONFIG"),
        }
    }

    /// The engine configuration named by `FIN_HEALTH_CONFIG`, or defaults.
    pub fn load_engine_config(&self) -> Result<EngineConfig> {
        let Some(path) = &self.engine_config_path else {
            return Ok(EngineConfig::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config '{}'", path))?;
        EngineConfig::from_json_str(&text)
            .with_context(|| format!("Invalid engine config '{}'", path))
    }
}
