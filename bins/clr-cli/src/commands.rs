//! Subcommand implementations.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clr_core::traits::MatchingCalculator;
use clr_core::types::{AmountBasis, DonationRecord, MatchingReport, PayoutRecord, RawContribution};
use clr_core::{Amount, EngineError};
use clr_engine::{contributions_from_donations, validate_payouts, ClrEngine};
use serde::Serialize;
use tracing::info;

use crate::{ComputeArgs, ValidateArgs};

/// Run the engine over the input file and emit payouts or the full report.
pub fn compute(args: &ComputeArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let engine = ClrEngine::new(args.to_config()).context("invalid engine configuration")?;
    let report = run_engine(&engine, &text, args.donation_records, args.basis.into())
        .context("failed to compute matching")?;

    info!(
        projects = report.payouts.len(),
        saturated = report.saturated,
        "computed payouts"
    );

    if args.report {
        write_json(args.output.as_deref(), &report)
    } else {
        write_json(args.output.as_deref(), &report.payouts)
    }
}

/// Check a payout file against the round's funds and print the total.
pub fn validate(args: &ValidateArgs) -> Result<()> {
    let text = read_input(&args.payouts)?;
    let total = check_payouts(&text, &args.matching_pool_funds, &args.donations_funds)
        .context("payout validation failed")?;
    println!("{total}");
    Ok(())
}

/// Parse a payout list and check it against the round's funds.
pub fn check_payouts(
    text: &str,
    matching_pool_funds: &Amount,
    donations_funds: &Amount,
) -> Result<Amount, EngineError> {
    let payouts: Vec<PayoutRecord> = serde_json::from_str(text)?;
    let total = validate_payouts(&payouts, matching_pool_funds, donations_funds)?;
    info!(payouts = payouts.len(), %total, "payouts valid");
    Ok(total)
}

/// Parse `text` as contributions (or donation records) and run the engine.
pub fn run_engine(
    engine: &ClrEngine,
    text: &str,
    donation_records: bool,
    basis: AmountBasis,
) -> Result<MatchingReport, EngineError> {
    if donation_records {
        let records: Vec<DonationRecord> = serde_json::from_str(text)?;
        let contributions = contributions_from_donations(&records, basis)?;
        Ok(engine.compute_matching(&contributions)?)
    } else {
        let records: Vec<RawContribution> = serde_json::from_str(text)?;
        Ok(engine.run_raw(&records)?)
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
