//! clr-cli — Command-line front end for the CLR matching engine.
//!
//! Reads donations as JSON, computes quadratic funding payouts, and checks
//! payout lists against the funds available to a round. Results go to stdout
//! as JSON; logs go to stderr.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clr_core::constants::{
    DEFAULT_THRESHOLD, ENV_ROUNDING, ENV_THRESHOLD, ENV_TOTAL_POOL, ENV_UNDERSATURATION,
};
use clr_core::types::AmountBasis;
use clr_core::{Amount, ClrConfig, RoundingPolicy, UndersaturationPolicy};
use tracing::error;

/// Quadratic funding (CLR) matching pool calculator.
#[derive(Parser, Debug)]
#[command(name = "clr-cli", version, about = "Quadratic funding matching pool calculator")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute matching payouts from a donation list.
    Compute(ComputeArgs),
    /// Check a payout list against the round's available funds.
    Validate(ValidateArgs),
}

/// Which amount of a donation record counts toward matching.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BasisArg {
    /// Full donated amount.
    Total,
    /// Amount after protocol, referrer and chef fees.
    Net,
}

impl From<BasisArg> for AmountBasis {
    fn from(b: BasisArg) -> Self {
        match b {
            BasisArg::Total => AmountBasis::Total,
            BasisArg::Net => AmountBasis::Net,
        }
    }
}

#[derive(Args, Debug)]
struct ComputeArgs {
    /// JSON file with contributions ("-" reads stdin).
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Input holds donation records as stored by the donation contract.
    #[arg(long)]
    donation_records: bool,

    /// Amount basis for donation records.
    #[arg(long, value_enum, default_value_t = BasisArg::Total)]
    basis: BasisArg,

    /// CLR threshold in smallest units.
    #[arg(long, env = ENV_THRESHOLD, default_value_t = Amount::from(DEFAULT_THRESHOLD))]
    threshold: Amount,

    /// Matching pool in smallest units.
    #[arg(long, env = ENV_TOTAL_POOL)]
    pool: Amount,

    /// Rounding when the pool is saturated (truncate, largest-remainder).
    #[arg(long, env = ENV_ROUNDING, default_value_t = RoundingPolicy::Truncate)]
    rounding: RoundingPolicy,

    /// Handling of an undersaturated pool (leave-unspent, redistribute).
    #[arg(long, env = ENV_UNDERSATURATION, default_value_t = UndersaturationPolicy::LeaveUnspent)]
    undersaturation: UndersaturationPolicy,

    /// Print the full matching report instead of payouts only.
    #[arg(long)]
    report: bool,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ComputeArgs {
    /// Engine configuration from the CLI flags.
    fn to_config(&self) -> ClrConfig {
        ClrConfig::new(self.threshold.clone(), self.pool.clone())
            .with_rounding(self.rounding)
            .with_undersaturation(self.undersaturation)
    }
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// JSON file with payout records ("-" reads stdin).
    #[arg(short, long, default_value = "-")]
    payouts: PathBuf,

    /// Matching pool funds held by the round.
    #[arg(long)]
    matching_pool_funds: Amount,

    /// Public donation funds held by the round.
    #[arg(long)]
    donations_funds: Amount,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let result = match &cli.command {
        Commands::Compute(args) => commands::compute(args),
        Commands::Validate(args) => commands::validate(args),
    };

    if let Err(e) = result {
        error!("{e:#}");
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
