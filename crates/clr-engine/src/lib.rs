//! # clr-engine — Quadratic funding matching pool allocation.
//!
//! All calculations use arbitrary-precision integers only, for determinism
//! at blockchain-scale magnitudes.
//!
//! The pipeline turns a flat list of donations into per-project payouts:
//! - **Aggregation**: project → donor → summed amount.
//! - **Pairwise overlap**: for every donor pair, `sum of sqrt(a_i * a_j)`
//!   over all projects both fund.
//! - **Allocation**: per project, each distinct donor pair contributes
//!   `sqrt(a_i * a_j) * threshold / overlap(i, j)`.
//! - **Saturation**: if the raw total reaches the pool, scale everything down
//!   proportionally to fit the pool.
//! - **Payouts**: decimal-string settlement records.

pub mod aggregate;
pub mod allocator;
pub mod donations;
pub mod engine;
pub mod overlap;
pub mod payout;
pub mod saturation;

pub use aggregate::{aggregate, aggregate_raw};
pub use allocator::allocate;
pub use donations::contributions_from_donations;
pub use engine::ClrEngine;
pub use overlap::pair_overlaps;
pub use payout::{format_payouts, validate_payouts};
pub use saturation::{normalize, Saturation};
