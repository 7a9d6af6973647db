use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, PercentagePoints};

/// One historical reporting period. Sequences are ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPeriod {
    pub label: String,
    #[serde(default)]
    pub revenue: Money,
    #[serde(default)]
    pub cogs: Money,
    #[serde(default)]
    pub operating_expenses: Money,
    #[serde(default)]
    pub net_income: Money,
    #[serde(default)]
    pub assets: Money,
    #[serde(default)]
    pub liabilities: Money,
    #[serde(default)]
    pub cash: Money,
    #[serde(default)]
    pub free_cash_flow: Money,
}

impl FinancialPeriod {
    /// A period with every amount zero.
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            revenue: Decimal::ZERO,
            cogs: Decimal::ZERO,
            operating_expenses: Decimal::ZERO,
            net_income: Decimal::ZERO,
            assets: Decimal::ZERO,
            liabilities: Decimal::ZERO,
            cash: Decimal::ZERO,
            free_cash_flow: Decimal::ZERO,
        }
    }
}

/// Scenario levers, in percentage points layered on the trailing trend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioAssumptions {
    pub revenue_growth: PercentagePoints,
    pub margin_shift: PercentagePoints,
    pub efficiency_gain: PercentagePoints,
    pub cash_conversion: PercentagePoints,
}
