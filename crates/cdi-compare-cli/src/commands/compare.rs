use clap::Args;
use serde_json::Value;
use tracing::info;

use cdi_compare_core::returns::comparison::{self, InvestmentInput};

use crate::commands::common::{load_input, InvestmentArgs};

/// Arguments for a single-term regime comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub investment: InvestmentArgs,

    /// Term in days
    #[arg(long, default_value_t = 30)]
    pub term: u32,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inv = &args.investment;
    let compare_input: InvestmentInput = load_input(inv.input.as_deref(), || {
        inv.check_ranges()?;
        if args.term == 0 {
            return Err("--term must be at least 1 day".into());
        }
        Ok(InvestmentInput {
            principal: inv.principal,
            return_spec: inv.return_spec(),
            cdi_annual_rate: inv.cdi,
            term_days: args.term,
            category: inv.category.into(),
        })
    })?;

    info!(term_days = compare_input.term_days, "running regime comparison");
    let result = comparison::compare_returns(&compare_input)?;
    Ok(serde_json::to_value(result)?)
}
