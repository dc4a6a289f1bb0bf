//! Integration test suite for CLR matching.
//!
//! Cross-crate scenarios and property tests that exercise the engine end to
//! end, from raw donation lists to payout records.

pub mod helpers;
