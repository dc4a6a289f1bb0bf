//! Matching pool saturation normalization.
//!
//! When the raw matching total meets or exceeds the pool, every project is
//! scaled to `floor(raw * pool / raw_total)`. Under
//! [`RoundingPolicy::LargestRemainder`] the truncation leftover (always fewer
//! units than there are projects) is handed out one unit at a time to the
//! largest division remainders, ties broken by project id.
//!
//! Below the pool, amounts stay raw unless [`UndersaturationPolicy::Redistribute`]
//! asks for the same proportional scaling upward.

use clr_core::amount::Amount;
use clr_core::config::{RoundingPolicy, UndersaturationPolicy};
use clr_core::types::MatchingResult;
use tracing::{debug, info};

/// Outcome of one normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saturation {
    /// Raw total met or exceeded the pool and was scaled down.
    pub saturated: bool,
    /// Sum of raw matching amounts.
    pub raw_total: Amount,
    /// Sum of final matching amounts.
    pub distributed: Amount,
}

/// Set `matching_amount` on every result and report what was distributed.
///
/// Recomputed from scratch on every call; any previous `matching_amount`
/// is overwritten.
pub fn normalize(
    results: &mut [MatchingResult],
    total_pool: &Amount,
    rounding: RoundingPolicy,
    undersaturation: UndersaturationPolicy,
) -> Saturation {
    let raw_total: Amount = results.iter().map(|r| &r.raw_matching_amount).sum();

    let saturated = !raw_total.is_zero() && raw_total >= *total_pool;
    let scale = saturated
        || (!raw_total.is_zero() && undersaturation == UndersaturationPolicy::Redistribute);

    if scale {
        info!(
            %raw_total,
            %total_pool,
            saturated,
            "scaling matching to pool"
        );
        scale_to_pool(results, &raw_total, total_pool, rounding);
    } else {
        for r in results.iter_mut() {
            r.matching_amount = r.raw_matching_amount.clone();
        }
    }

    let distributed: Amount = results.iter().map(|r| &r.matching_amount).sum();
    debug!(%distributed, saturated, "normalized matching");
    Saturation {
        saturated,
        raw_total,
        distributed,
    }
}

/// Proportional scaling so the amounts sum to (at most) `pool`.
///
/// `raw_total` must be the non-zero sum of raw amounts.
fn scale_to_pool(
    results: &mut [MatchingResult],
    raw_total: &Amount,
    pool: &Amount,
    rounding: RoundingPolicy,
) {
    let mut remainders = Vec::with_capacity(results.len());
    let mut allotted = Amount::zero();

    for (i, r) in results.iter_mut().enumerate() {
        let (share, rem) = r
            .raw_matching_amount
            .mul_div_rem(pool, raw_total)
            .unwrap_or_default();
        allotted += &share;
        r.matching_amount = share;
        remainders.push((rem, i));
    }

    if rounding != RoundingPolicy::LargestRemainder {
        return;
    }

    // Largest remainder first; equal remainders keep project id order.
    remainders.sort_by(|(ra, ia), (rb, ib)| {
        rb.cmp(ra)
            .then_with(|| results[*ia].project_id.cmp(&results[*ib].project_id))
    });

    let mut leftover = pool.saturating_sub(&allotted);
    let one = Amount::from(1u64);
    for (rem, i) in remainders {
        if leftover.is_zero() || rem.is_zero() {
            break;
        }
        results[i].matching_amount += &one;
        leftover = leftover.saturating_sub(&one);
    }
}
