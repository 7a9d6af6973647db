use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinHealthError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Empty input: at least one financial period is required")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinHealthError {
    fn from(e: serde_json::Error) -> Self {
        FinHealthError::SerializationError(e.to_string())
    }
}
