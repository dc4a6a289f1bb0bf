//! Trait interfaces for CLR matching.
//!
//! - [`MatchingCalculator`] — matching pool allocation (clr-engine implements)

use crate::config::ClrConfig;
use crate::error::ClrError;
use crate::types::{Contribution, MatchingReport, PayoutRecord};

/// Pure computation of matching pool allocations.
///
/// Implementations hold no mutable state: every call is a function of the
/// contributions and the configuration alone, so a single calculator can be
/// shared across threads.
pub trait MatchingCalculator: Send + Sync {
    /// Parameters this calculator runs with.
    fn config(&self) -> &ClrConfig;

    /// Run the full pipeline: aggregate, overlap, allocate, normalize, format.
    fn compute_matching(&self, contributions: &[Contribution]) -> Result<MatchingReport, ClrError>;

    /// Payout records only.
    ///
    /// Default implementation: `compute_matching(...).payouts`.
    fn compute_payouts(&self, contributions: &[Contribution]) -> Result<Vec<PayoutRecord>, ClrError> {
        Ok(self.compute_matching(contributions)?.payouts)
    }
}
