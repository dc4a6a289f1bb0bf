//! # clr-core
//! Foundation types and traits for quadratic funding (CLR) matching.

pub mod amount;
pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use amount::Amount;
pub use config::{ClrConfig, RoundingPolicy, UndersaturationPolicy};
pub use error::{AmountError, ClrError, EngineError, PayoutError};
pub use traits::MatchingCalculator;
