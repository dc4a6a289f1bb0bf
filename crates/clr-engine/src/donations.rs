//! Conversion from stored donation records to contributions.
//!
//! Rules:
//! 1. Matching pool donations (flagged, or without a recipient) fund the pool
//!    and are skipped.
//! 2. [`AmountBasis::Net`] subtracts protocol, referrer and chef fees; fees
//!    larger than the donation are an error, not a clamp.
//! 3. Donations whose counted amount is zero are skipped: a zero amount gives
//!    its pairs zero overlap, which the allocator rejects.

use clr_core::amount::Amount;
use clr_core::error::{AmountError, ClrError};
use clr_core::types::{AmountBasis, Contribution, DonationRecord};
use tracing::debug;

/// Turn donation records into contributions for the matching engine.
pub fn contributions_from_donations(
    records: &[DonationRecord],
    basis: AmountBasis,
) -> Result<Vec<Contribution>, ClrError> {
    let mut contributions = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for record in records {
        let project_id = match (&record.recipient_id, record.matching_pool) {
            (Some(project_id), false) => project_id,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let amount = counted_amount(record, basis).map_err(|source| ClrError::InvalidAmount {
            project_id: project_id.clone(),
            donor_id: record.donor_id.clone(),
            source,
        })?;
        if amount.is_zero() {
            skipped += 1;
            continue;
        }

        contributions.push(Contribution::new(
            project_id.clone(),
            record.donor_id.clone(),
            amount,
        ));
    }

    debug!(
        records = records.len(),
        contributions = contributions.len(),
        skipped,
        ?basis,
        "converted donation records"
    );
    Ok(contributions)
}

fn counted_amount(record: &DonationRecord, basis: AmountBasis) -> Result<Amount, AmountError> {
    match basis {
        AmountBasis::Total => Ok(record.total_amount.clone()),
        AmountBasis::Net => {
            let fees = record.fees();
            record
                .total_amount
                .checked_sub(&fees)
                .ok_or_else(|| AmountError::FeesExceedTotal {
                    total: record.total_amount.clone(),
                    fees,
                })
        }
    }
}
