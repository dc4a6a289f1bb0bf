//! Pairwise donor overlap.
//!
//! For every project and every ordered donor pair `(k1, k2)` funding it,
//! including `k1 == k2`, accumulates `floor(sqrt(a[k1] * a[k2]))` into
//! `overlap[k1][k2]`. The index is symmetric and its diagonal holds each
//! donor's total giving (`sqrt(a * a) == a`).
//!
//! Only co-occurring pairs get an entry. Cost is O(projects × donors²).

use clr_core::types::{ContributionIndex, PairOverlapIndex};
use tracing::debug;

/// Build the cross-project overlap index.
pub fn pair_overlaps(index: &ContributionIndex) -> PairOverlapIndex {
    let mut overlaps = PairOverlapIndex::new();
    for donors in index.values() {
        for (k1, a1) in donors {
            let row = overlaps.entry(k1.clone()).or_default();
            for (k2, a2) in donors {
                *row.entry(k2.clone()).or_default() += a1.sqrt_product(a2);
            }
        }
    }
    debug!(donors = overlaps.len(), "computed pairwise overlaps");
    overlaps
}
