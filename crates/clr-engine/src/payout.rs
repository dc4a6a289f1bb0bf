//! Payout formatting and budget validation.
//!
//! [`format_payouts`] renders results into settlement records.
//! [`validate_payouts`] is the check a settlement layer runs before accepting
//! a payout list: every project at most once, and the running total of
//! matching plus donations never above the funds held for the round.

use std::collections::BTreeSet;

use clr_core::amount::Amount;
use clr_core::error::PayoutError;
use clr_core::types::{MatchingResult, PayoutRecord};
use tracing::warn;

/// Map results 1:1 to payout records with decimal-string amounts.
pub fn format_payouts(results: &[MatchingResult]) -> Vec<PayoutRecord> {
    results
        .iter()
        .map(|r| PayoutRecord {
            project_id: r.project_id.clone(),
            matching_pool_amount: r.matching_amount.to_string(),
            donations_amount: r.total_donated.to_string(),
        })
        .collect()
}

/// Check a payout list against the funds available to the round.
///
/// Returns the total paid out (matching plus donations) on success.
pub fn validate_payouts(
    payouts: &[PayoutRecord],
    matching_pool_funds: &Amount,
    donations_funds: &Amount,
) -> Result<Amount, PayoutError> {
    let available = matching_pool_funds + donations_funds;
    let mut seen = BTreeSet::new();
    let mut running_total = Amount::zero();

    for payout in payouts {
        if !seen.insert(payout.project_id.as_str()) {
            return Err(PayoutError::DuplicateProject(payout.project_id.clone()));
        }
        running_total += parse_field(payout, "matching_pool_amount", &payout.matching_pool_amount)?;
        running_total += parse_field(payout, "donations_amount", &payout.donations_amount)?;
        if running_total > available {
            warn!(
                project = %payout.project_id,
                total = %running_total,
                %available,
                "payouts exceed available balance"
            );
            return Err(PayoutError::ExceedsBalance {
                total: running_total,
                available,
            });
        }
    }
    Ok(running_total)
}

fn parse_field(
    payout: &PayoutRecord,
    field: &'static str,
    value: &str,
) -> Result<Amount, PayoutError> {
    value.parse().map_err(|source| PayoutError::InvalidAmount {
        project_id: payout.project_id.clone(),
        field,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clr_core::error::AmountError;

    fn payout(project: &str, matching: &str, donations: &str) -> PayoutRecord {
        PayoutRecord {
            project_id: project.into(),
            matching_pool_amount: matching.into(),
            donations_amount: donations.into(),
        }
    }

    // --- format_payouts ---

    #[test]
    fn formats_final_not_raw() {
        let results = vec![MatchingResult {
            project_id: "a".into(),
            contributor_count: 2,
            total_donated: Amount::from(15_000_000u64),
            raw_matching_amount: Amount::from(50u64),
            matching_amount: Amount::from(25u64),
        }];
        assert_eq!(format_payouts(&results), vec![payout("a", "25", "15000000")]);
    }

    #[test]
    fn formats_large_amounts_without_exponent() {
        let big: Amount = "123456789012345678901234567890".parse().unwrap();
        let results = vec![MatchingResult {
            project_id: "a".into(),
            contributor_count: 1,
            total_donated: big.clone(),
            raw_matching_amount: Amount::zero(),
            matching_amount: Amount::zero(),
        }];
        let p = &format_payouts(&results)[0];
        assert_eq!(p.donations_amount, "123456789012345678901234567890");
        assert_eq!(p.matching_pool_amount, "0");
    }

    #[test]
    fn preserves_order() {
        let results: Vec<_> = ["c", "a", "b"]
            .iter()
            .map(|p| MatchingResult {
                project_id: p.to_string(),
                contributor_count: 1,
                total_donated: Amount::zero(),
                raw_matching_amount: Amount::zero(),
                matching_amount: Amount::zero(),
            })
            .collect();
        let ids: Vec<_> = format_payouts(&results)
            .into_iter()
            .map(|p| p.project_id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    // --- validate_payouts ---

    #[test]
    fn within_balance_returns_total() {
        let total = validate_payouts(
            &[payout("a", "25", "15"), payout("b", "0", "20")],
            &Amount::from(50u64),
            &Amount::from(35u64),
        )
        .unwrap();
        assert_eq!(total, Amount::from(60u64));
    }

    #[test]
    fn exactly_at_balance_ok() {
        assert!(validate_payouts(
            &[payout("a", "50", "35")],
            &Amount::from(50u64),
            &Amount::from(35u64),
        )
        .is_ok());
    }

    #[test]
    fn exceeding_balance_rejected() {
        let err = validate_payouts(
            &[payout("a", "40", "10"), payout("b", "20", "0")],
            &Amount::from(50u64),
            &Amount::from(10u64),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PayoutError::ExceedsBalance {
                total: Amount::from(70u64),
                available: Amount::from(60u64),
            }
        );
    }

    #[test]
    fn duplicate_project_rejected() {
        let err = validate_payouts(
            &[payout("a", "1", "1"), payout("a", "1", "1")],
            &Amount::from(100u64),
            &Amount::from(100u64),
        )
        .unwrap_err();
        assert_eq!(err, PayoutError::DuplicateProject("a".into()));
    }

    #[test]
    fn malformed_amount_rejected() {
        let err = validate_payouts(
            &[payout("a", "1.5", "0")],
            &Amount::from(100u64),
            &Amount::zero(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PayoutError::InvalidAmount {
                project_id: "a".into(),
                field: "matching_pool_amount",
                source: AmountError::NonNumeric("1.5".into()),
            }
        );
    }

    #[test]
    fn empty_payouts_total_zero() {
        assert!(validate_payouts(&[], &Amount::zero(), &Amount::zero())
            .unwrap()
            .is_zero());
    }
}
