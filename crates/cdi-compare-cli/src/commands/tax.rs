use clap::Args;
use serde_json::Value;

use cdi_compare_core::tax::brackets::{self, TaxRateQuery};

use crate::commands::common::CategoryArg;
use crate::input;

/// Arguments for a withholding-tax rate lookup
#[derive(Args)]
pub struct TaxRateArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Investment category
    #[arg(long, value_enum, default_value_t = CategoryArg::Taxable)]
    pub category: CategoryArg,

    /// Term in days
    #[arg(long, default_value_t = 30)]
    pub term: u32,
}

pub fn run_tax_rates(args: TaxRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let query: TaxRateQuery = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else {
        TaxRateQuery {
            category: args.category.into(),
            term_days: args.term,
        }
    };
    let result = brackets::regime_rates_for(&query)?;
    Ok(serde_json::to_value(result)?)
}
