use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use cdi_compare_core::cdi::{self, CdiQuery};

use crate::input;

/// Arguments for CDI-equivalence conversion
#[derive(Args)]
pub struct CdiArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual rate in percent
    #[arg(long, required_unless_present = "input")]
    pub rate: Option<Decimal>,

    /// CDI annual rate in percent
    #[arg(long, default_value = "14.65")]
    pub cdi: Decimal,
}

pub fn run_cdi_equivalent(args: CdiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let query: CdiQuery = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else {
        CdiQuery {
            annual_rate: args.rate.ok_or("--rate is required")?,
            cdi_annual_rate: args.cdi,
        }
    };
    let result = cdi::cdi_equivalence_for(&query)?;
    Ok(serde_json::to_value(result)?)
}
