//! Shared test helpers for scenario and property tests.

use clr_core::constants::YOCTO_PER_NEAR;
use clr_core::types::Contribution;
use clr_core::{Amount, ClrConfig, RoundingPolicy};
use clr_engine::ClrEngine;

/// Contribution with an amount in smallest units.
pub fn contribution(project: &str, donor: &str, amount: u128) -> Contribution {
    Contribution::new(project, donor, amount)
}

/// Contribution with an amount in whole tokens.
pub fn near(project: &str, donor: &str, tokens: u128) -> Contribution {
    contribution(project, donor, tokens * YOCTO_PER_NEAR)
}

/// Engine with default policies.
pub fn engine(threshold: u128, pool: u128) -> ClrEngine {
    engine_with(threshold, pool, RoundingPolicy::Truncate)
}

/// Engine with an explicit rounding policy.
pub fn engine_with(threshold: u128, pool: u128, rounding: RoundingPolicy) -> ClrEngine {
    let config = ClrConfig::new(Amount::from(threshold), Amount::from(pool)).with_rounding(rounding);
    ClrEngine::new(config).expect("positive threshold")
}

/// The sample round used when the matching formula was first prototyped:
/// two projects, sixteen donations in whole tokens, repeated donors.
pub fn sample_round() -> Vec<Contribution> {
    [
        ("4", "1", 10),
        ("4", "2", 5),
        ("4", "2", 10),
        ("4", "3", 7),
        ("4", "5", 5),
        ("4", "4", 10),
        ("4", "5", 5),
        ("4", "5", 5),
        ("5", "1", 10),
        ("5", "1", 5),
        ("5", "2", 20),
        ("5", "3", 3),
        ("5", "8", 2),
        ("5", "9", 10),
        ("5", "7", 7),
        ("5", "2", 5),
    ]
    .into_iter()
    .map(|(p, d, t)| near(p, d, t))
    .collect()
}

/// Sum of `matching_pool_amount` across payouts.
pub fn total_matching(payouts: &[clr_core::types::PayoutRecord]) -> Amount {
    payouts
        .iter()
        .map(|p| p.matching_pool_amount.parse::<Amount>().expect("decimal payout"))
        .sum()
}
