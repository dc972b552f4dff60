mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::cdi::CdiArgs;
use commands::compare::CompareArgs;
use commands::scenarios::ScenarioArgs;
use commands::tax::TaxRateArgs;

/// Fixed-income return comparison across withholding-tax regimes
#[derive(Parser)]
#[command(
    name = "cdic",
    version,
    about = "Compare fixed-income returns under the current and proposed withholding-tax regimes",
    long_about = "Computes gross and net returns, tax paid and CDI-equivalent rates for a \
                  fixed-income investment under the current regressive withholding-tax \
                  table and the proposed flat rates, for one term or a set of terms."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare both regimes for a single term
    Compare(CompareArgs),
    /// Compare both regimes across a set of terms and pick the best and worst
    Scenarios(ScenarioArgs),
    /// Look up the withholding-tax rates for a category and term
    TaxRates(TaxRateArgs),
    /// Express an annual rate as a percentage of CDI
    CdiEquivalent(CdiArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Scenarios(args) => commands::scenarios::run_scenarios(args),
        Commands::TaxRates(args) => commands::tax::run_tax_rates(args),
        Commands::CdiEquivalent(args) => commands::cdi::run_cdi_equivalent(args),
        Commands::Version => {
            println!("cdic {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
