//! Core matching types: contributions, indexes, results and payouts.
//!
//! All monetary values are [`Amount`]s in the smallest unit and serialize as
//! decimal-integer strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::ClrError;

pub type ProjectId = String;
pub type DonorId = String;

/// project → donor → aggregated amount. Ordered maps keep iteration deterministic.
pub type ContributionIndex = BTreeMap<ProjectId, BTreeMap<DonorId, Amount>>;

/// donor → donor → accumulated `sqrt(a_i * a_j)` across co-funded projects.
pub type PairOverlapIndex = BTreeMap<DonorId, BTreeMap<DonorId, Amount>>;

/// A single donation from a donor to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub project_id: ProjectId,
    pub donor_id: DonorId,
    pub amount: Amount,
}

impl Contribution {
    pub fn new(
        project_id: impl Into<ProjectId>,
        donor_id: impl Into<DonorId>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            donor_id: donor_id.into(),
            amount: amount.into(),
        }
    }

    /// Build a contribution from an unparsed decimal amount.
    ///
    /// Fails with [`ClrError::InvalidAmount`] naming the donor and project.
    pub fn parse(project_id: &str, donor_id: &str, amount: &str) -> Result<Self, ClrError> {
        let amount: Amount = amount.parse().map_err(|source| ClrError::InvalidAmount {
            project_id: project_id.to_string(),
            donor_id: donor_id.to_string(),
            source,
        })?;
        Ok(Self::new(project_id, donor_id, amount))
    }
}

/// A contribution as received from the outside, amount not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContribution {
    pub project_id: ProjectId,
    pub donor_id: DonorId,
    pub amount: String,
}

impl TryFrom<&RawContribution> for Contribution {
    type Error = ClrError;

    fn try_from(raw: &RawContribution) -> Result<Self, Self::Error> {
        Contribution::parse(&raw.project_id, &raw.donor_id, &raw.amount)
    }
}

/// Matching outcome for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingResult {
    pub project_id: ProjectId,
    /// Number of distinct donors.
    pub contributor_count: usize,
    /// Sum of all donor amounts.
    pub total_donated: Amount,
    /// Matching before saturation normalization.
    pub raw_matching_amount: Amount,
    /// Matching after normalization. Equals the raw amount until normalized.
    pub matching_amount: Amount,
}

/// Settlement instruction for one project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayoutRecord {
    pub project_id: ProjectId,
    /// Matching pool share, decimal-integer string.
    pub matching_pool_amount: String,
    /// Direct donations, decimal-integer string.
    pub donations_amount: String,
}

/// Full output of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingReport {
    /// Per-project results sorted by project id.
    pub results: Vec<MatchingResult>,
    /// Payout records in the same order as `results`.
    pub payouts: Vec<PayoutRecord>,
    /// Whether the raw total met or exceeded the pool and was scaled down.
    pub saturated: bool,
    /// Sum of raw matching amounts.
    pub raw_total: Amount,
    /// Sum of final matching amounts.
    pub distributed: Amount,
    /// `total_pool - distributed`, zero when over-allocated.
    pub unallocated: Amount,
}

/// Which amount of a donation counts as the contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountBasis {
    /// The full amount the donor sent.
    #[default]
    Total,
    /// What the project receives after protocol, referrer and chef fees.
    Net,
}

/// A donation as stored by the donation and pot contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    pub id: u64,
    pub donor_id: DonorId,
    /// Receiving project. Absent for matching pool donations.
    #[serde(default, alias = "project_id")]
    pub recipient_id: Option<ProjectId>,
    pub total_amount: Amount,
    #[serde(default)]
    pub protocol_fee: Amount,
    #[serde(default)]
    pub referrer_fee: Option<Amount>,
    #[serde(default)]
    pub chef_fee: Option<Amount>,
    /// Donation to the matching pool rather than a project.
    #[serde(default)]
    pub matching_pool: bool,
}

impl DonationRecord {
    /// Sum of all fees taken from the donation.
    pub fn fees(&self) -> Amount {
        let mut fees = self.protocol_fee.clone();
        if let Some(f) = &self.referrer_fee {
            fees += f;
        }
        if let Some(f) = &self.chef_fee {
            fees += f;
        }
        fees
    }
}
