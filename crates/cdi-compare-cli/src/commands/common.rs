use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::DeserializeOwned;

use cdi_compare_core::{InvestmentCategory, ReturnSpec};

use crate::input;

/// Investment category as accepted on the command line
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CategoryArg {
    #[default]
    Taxable,
    TaxExempt,
}

impl From<CategoryArg> for InvestmentCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Taxable => InvestmentCategory::Taxable,
            CategoryArg::TaxExempt => InvestmentCategory::TaxExempt,
        }
    }
}

/// How the return value is quoted
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ReturnTypeArg {
    /// Percentage of CDI (100 = 100% of CDI)
    #[default]
    Cdi,
    /// Flat pre-fixed annual percentage
    PreFixed,
}

/// Investment parameters shared by the comparison commands
#[derive(Args, Debug)]
pub struct InvestmentArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested
    #[arg(long, default_value = "10000.00")]
    pub principal: Decimal,

    /// CDI annual rate in percent
    #[arg(long, default_value = "14.65")]
    pub cdi: Decimal,

    /// How --return-value is quoted
    #[arg(long, value_enum, default_value_t = ReturnTypeArg::Cdi)]
    pub return_type: ReturnTypeArg,

    /// Return in percent; defaults to 100 (% of CDI) or 14.00 (pre-fixed)
    #[arg(long)]
    pub return_value: Option<Decimal>,

    /// Investment category
    #[arg(long, value_enum, default_value_t = CategoryArg::Taxable)]
    pub category: CategoryArg,
}

impl InvestmentArgs {
    pub fn return_spec(&self) -> ReturnSpec {
        match self.return_type {
            ReturnTypeArg::Cdi => ReturnSpec::PercentOfCdi(self.return_value.unwrap_or(dec!(100))),
            ReturnTypeArg::PreFixed => {
                ReturnSpec::PreFixed(self.return_value.unwrap_or(dec!(14.00)))
            }
        }
    }

    /// Reject values the input form would never let through.
    pub fn check_ranges(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.principal < dec!(100) {
            return Err("--principal must be at least 100.00".into());
        }
        if self.cdi < Decimal::ZERO {
            return Err("--cdi cannot be negative".into());
        }
        if self.return_spec().value() < Decimal::ZERO {
            return Err("--return-value cannot be negative".into());
        }
        Ok(())
    }
}

/// Load a typed input from `--input`, piped stdin, or fall back to `from_flags`.
pub fn load_input<T, F>(path: Option<&str>, from_flags: F) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    if let Some(path) = path {
        input::file::read_input(path)
    } else if let Some(piped) = input::stdin::read_stdin()? {
        Ok(piped)
    } else {
        from_flags()
    }
}
