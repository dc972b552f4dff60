use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdiCompareError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid rate domain: annual rate of {annual_rate_pct}% must be greater than -100%")]
    InvalidRateDomain { annual_rate_pct: Decimal },
}
