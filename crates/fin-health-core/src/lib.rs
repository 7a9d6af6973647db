pub mod config;
pub mod error;
pub mod numeric;
pub mod types;

#[cfg(feature = "analysis")]
pub mod analysis;

#[cfg(feature = "sanitize")]
pub mod sanitize;

pub use config::EngineConfig;
pub use error::FinHealthError;
pub use types::*;

/// Standard result type for all fin-health boundary operations
pub type FinHealthResult<T> = Result<T, FinHealthError>;
