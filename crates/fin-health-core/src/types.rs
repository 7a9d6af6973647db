use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Multiples (e.g., 1.8x burn multiple)
pub type Multiple = Decimal;

/// Integer-valued health score in [0, 100]
pub type Score = Decimal;

/// Percentage points (5 = +5pp). Only used for scenario levers.
pub type PercentagePoints = Decimal;

/// Standard computation output envelope: the result plus the methodology,
/// the assumptions it ran under and any warnings raised along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

impl<T: Serialize> ComputationOutput<T> {
    /// Put warnings raised before the computation (e.g. while sanitising
    /// the payload) ahead of the computation's own.
    pub fn prepend_warnings(&mut self, earlier: Vec<String>) {
        let own = std::mem::replace(&mut self.warnings, earlier);
        self.warnings.extend(own);
    }
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prepend_warnings_keeps_order() {
        let mut out = with_metadata("m", &(), vec!["engine".to_string()], 0, 1u8);
        out.prepend_warnings(vec!["sanitizer".to_string()]);
        assert_eq!(out.warnings, vec!["sanitizer", "engine"]);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
