use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.175 = 17.5%). Tax rates and period returns.
pub type Rate = Decimal;

/// Percentage points (14.65 = 14.65%). Annual rates, CDI and %-of-CDI figures.
pub type Percent = Decimal;

/// Investment category, which selects the withholding-tax rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentCategory {
    /// Subject to the regressive income-tax table today.
    #[default]
    Taxable,
    /// Exempt today (e.g. LCI/LCA, incentivised debentures).
    TaxExempt,
}

/// How the investment's yield is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ReturnSpec {
    /// Yield as a percentage of CDI (100 = 100% of CDI).
    PercentOfCdi(Percent),
    /// Flat pre-fixed annual percentage.
    PreFixed(Percent),
}

impl ReturnSpec {
    /// The quoted number, whatever its interpretation.
    pub fn value(&self) -> Percent {
        match self {
            ReturnSpec::PercentOfCdi(v) | ReturnSpec::PreFixed(v) => *v,
        }
    }
}

/// Withholding-tax rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Rules in force today.
    Current,
    /// Proposed rules.
    Proposed,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
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
