//! CLR matching allocation.
//!
//! For each project, every unordered pair of distinct donors `k1 < k2`
//! (donor ids compared lexicographically) contributes
//!
//! ```text
//! pair_term = floor(floor(sqrt(a[k1] * a[k2])) * threshold / overlap[k1][k2])
//! ```
//!
//! The threshold is multiplied in before the division by the overlap so the
//! only loss is one truncation per pair. The overlap denominator discounts
//! donor pairs that co-fund many projects.

use clr_core::amount::Amount;
use clr_core::error::ClrError;
use clr_core::types::{ContributionIndex, MatchingResult, PairOverlapIndex};
use tracing::debug;

/// Compute raw matching per project, sorted by project id.
///
/// Projects with a single donor get a raw matching of zero. Fails with
/// [`ClrError::InvalidThreshold`] for a zero threshold and with
/// [`ClrError::DivisionByZero`] when a co-occurring pair has zero (or no)
/// overlap, which happens when one of the two amounts is zero.
pub fn allocate(
    index: &ContributionIndex,
    overlaps: &PairOverlapIndex,
    threshold: &Amount,
) -> Result<Vec<MatchingResult>, ClrError> {
    if threshold.is_zero() {
        return Err(ClrError::InvalidThreshold);
    }

    let mut results = Vec::with_capacity(index.len());
    for (project_id, donors) in index {
        let entries: Vec<_> = donors.iter().collect();
        let mut raw = Amount::zero();

        for (i, (k1, a1)) in entries.iter().enumerate() {
            for (k2, a2) in &entries[i + 1..] {
                let overlap = overlaps
                    .get(*k1)
                    .and_then(|row| row.get(*k2))
                    .filter(|o| !o.is_zero())
                    .ok_or_else(|| ClrError::DivisionByZero {
                        left: (*k1).clone(),
                        right: (*k2).clone(),
                    })?;
                let root = a1.sqrt_product(a2);
                raw += root
                    .mul_div_floor(threshold, overlap)
                    .ok_or_else(|| ClrError::DivisionByZero {
                        left: (*k1).clone(),
                        right: (*k2).clone(),
                    })?;
            }
        }

        let total_donated: Amount = donors.values().sum();
        debug!(
            project = %project_id,
            contributors = donors.len(),
            %raw,
            "allocated raw matching"
        );
        results.push(MatchingResult {
            project_id: project_id.clone(),
            contributor_count: donors.len(),
            total_donated,
            matching_amount: raw.clone(),
            raw_matching_amount: raw,
        });
    }
    Ok(results)
}
