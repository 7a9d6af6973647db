//! The analysis pipeline:
//! periods -> metrics -> (projection, health, signals) -> narrative.

pub mod engine;
pub mod health;
pub mod metrics;
pub mod narrative;
pub mod period;
pub mod projection;
pub mod signals;

pub use engine::{
    analyze, analyze_with_config, run_analysis, run_scenario, run_trailing_metrics, AnalysisInput,
    AnalysisResult, ScenarioOutput,
};
pub use health::HealthScores;
pub use metrics::TrailingMetrics;
pub use narrative::Recommendation;
pub use period::{FinancialPeriod, ScenarioAssumptions};
pub use projection::ScenarioYear;
