//! Contribution aggregation.
//!
//! Folds a flat donation list into a [`ContributionIndex`]. Repeated
//! (project, donor) pairs are additive; nothing is ever subtracted or removed.

use clr_core::error::ClrError;
use clr_core::types::{Contribution, ContributionIndex, RawContribution};
use tracing::debug;

/// Sum contributions into `project → donor → amount`.
pub fn aggregate<'a, I>(contributions: I) -> ContributionIndex
where
    I: IntoIterator<Item = &'a Contribution>,
{
    let mut index = ContributionIndex::new();
    let mut records = 0usize;
    for c in contributions {
        *index
            .entry(c.project_id.clone())
            .or_default()
            .entry(c.donor_id.clone())
            .or_default() += &c.amount;
        records += 1;
    }
    debug!(records, projects = index.len(), "aggregated contributions");
    index
}

/// Parse and aggregate unvalidated records.
///
/// Aborts on the first negative or non-numeric amount with
/// [`ClrError::InvalidAmount`]; a partial index is never returned.
pub fn aggregate_raw(records: &[RawContribution]) -> Result<ContributionIndex, ClrError> {
    let parsed = records
        .iter()
        .map(Contribution::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(aggregate(&parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clr_core::error::AmountError;
    use clr_core::Amount;

    fn c(project: &str, donor: &str, amount: u64) -> Contribution {
        Contribution::new(project, donor, amount)
    }

    fn raw(project: &str, donor: &str, amount: &str) -> RawContribution {
        RawContribution {
            project_id: project.into(),
            donor_id: donor.into(),
            amount: amount.into(),
        }
    }

    #[test]
    fn empty_input_empty_index() {
        let none: Vec<Contribution> = Vec::new();
        assert!(aggregate(&none).is_empty());
    }

    #[test]
    fn duplicates_are_additive() {
        let index = aggregate(&[c("4", "5", 5), c("4", "5", 5), c("4", "5", 5)]);
        assert_eq!(index["4"]["5"], Amount::from(15u64));
        assert_eq!(index["4"].len(), 1);
    }

    #[test]
    fn same_donor_different_projects_kept_apart() {
        let index = aggregate(&[c("a", "alice", 10), c("b", "alice", 20)]);
        assert_eq!(index["a"]["alice"], Amount::from(10u64));
        assert_eq!(index["b"]["alice"], Amount::from(20u64));
    }

    #[test]
    fn zero_amount_still_creates_entry() {
        let index = aggregate(&[c("a", "alice", 0)]);
        assert!(index["a"]["alice"].is_zero());
    }

    #[test]
    fn iteration_is_sorted() {
        let index = aggregate(&[c("b", "zed", 1), c("a", "bob", 1), c("a", "alice", 1)]);
        let projects: Vec<_> = index.keys().cloned().collect();
        assert_eq!(projects, vec!["a", "b"]);
        let donors: Vec<_> = index["a"].keys().cloned().collect();
        assert_eq!(donors, vec!["alice", "bob"]);
    }

    #[test]
    fn raw_yocto_amounts() {
        let index = aggregate_raw(&[
            raw("4", "2", "5000000000000000000000000"),
            raw("4", "2", "10000000000000000000000000"),
        ])
        .unwrap();
        assert_eq!(index["4"]["2"].to_string(), "15000000000000000000000000");
    }

    #[test]
    fn raw_negative_aborts() {
        let err = aggregate_raw(&[raw("a", "alice", "10"), raw("a", "bob", "-3")]).unwrap_err();
        assert_eq!(
            err,
            ClrError::InvalidAmount {
                project_id: "a".into(),
                donor_id: "bob".into(),
                source: AmountError::Negative("-3".into()),
            }
        );
    }

    #[test]
    fn raw_non_numeric_aborts() {
        assert!(matches!(
            aggregate_raw(&[raw("a", "alice", "ten")]),
            Err(ClrError::InvalidAmount { .. })
        ));
    }
}
