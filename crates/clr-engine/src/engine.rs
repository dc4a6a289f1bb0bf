//! Matching engine implementing the [`MatchingCalculator`] trait.
//!
//! Wires the pipeline stages together: aggregation, pairwise overlap,
//! allocation, saturation normalization and payout formatting. The engine
//! holds only its configuration; saturation is reported per call instead of
//! being remembered.

use clr_core::config::ClrConfig;
use clr_core::error::ClrError;
use clr_core::traits::MatchingCalculator;
use clr_core::types::{Contribution, ContributionIndex, MatchingReport, RawContribution};
use tracing::info;

use crate::aggregate::{aggregate, aggregate_raw};
use crate::allocator::allocate;
use crate::overlap::pair_overlaps;
use crate::payout::format_payouts;
use crate::saturation::normalize;

/// The production CLR matching calculator.
#[derive(Debug, Clone, Default)]
pub struct ClrEngine {
    config: ClrConfig,
}

impl ClrEngine {
    /// Create an engine, rejecting configurations it cannot run with.
    pub fn new(config: ClrConfig) -> Result<Self, ClrError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run on unvalidated records; any bad amount aborts the whole run.
    pub fn run_raw(&self, records: &[RawContribution]) -> Result<MatchingReport, ClrError> {
        let index = aggregate_raw(records)?;
        self.run_index(&index)
    }

    /// Run on an already aggregated index.
    pub fn run_index(&self, index: &ContributionIndex) -> Result<MatchingReport, ClrError> {
        self.config.validate()?;
        let overlaps = pair_overlaps(index);
        let mut results = allocate(index, &overlaps, &self.config.threshold)?;
        let saturation = normalize(
            &mut results,
            &self.config.total_pool,
            self.config.rounding,
            self.config.undersaturation,
        );
        let payouts = format_payouts(&results);
        let unallocated = self.config.total_pool.saturating_sub(&saturation.distributed);

        info!(
            projects = results.len(),
            saturated = saturation.saturated,
            raw_total = %saturation.raw_total,
            distributed = %saturation.distributed,
            %unallocated,
            "matching computed"
        );

        Ok(MatchingReport {
            results,
            payouts,
            saturated: saturation.saturated,
            raw_total: saturation.raw_total,
            distributed: saturation.distributed,
            unallocated,
        })
    }
}

impl MatchingCalculator for ClrEngine {
    fn config(&self) -> &ClrConfig {
        &self.config
    }

    fn compute_matching(&self, contributions: &[Contribution]) -> Result<MatchingReport, ClrError> {
        self.run_index(&aggregate(contributions))
    }
}
