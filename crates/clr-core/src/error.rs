//! Error types for CLR matching.
use thiserror::Error;

use crate::amount::Amount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")] Empty,
    #[error("negative amount: {0}")] Negative(String),
    #[error("non-numeric amount: {0}")] NonNumeric(String),
    #[error("integer too large to read as a number, quote it as a decimal string: {0}")] Unquoted(String),
    #[error("fees exceed total amount: total {total}, fees {fees}")] FeesExceedTotal { total: Amount, fees: Amount },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClrError {
    #[error("invalid amount from {donor_id} to {project_id}: {source}")] InvalidAmount { project_id: String, donor_id: String, source: AmountError },
    #[error("invalid {name}: {source}")] InvalidParameter { name: &'static str, source: AmountError },
    #[error("threshold must be positive")] InvalidThreshold,
    #[error("division by zero: overlap of {left} and {right} is zero")] DivisionByZero { left: String, right: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayoutError {
    #[error("invalid {field} for project {project_id}: {source}")] InvalidAmount { project_id: String, field: &'static str, source: AmountError },
    #[error("project has already been paid out: {0}")] DuplicateProject(String),
    #[error("payouts exceed available balance: {total} > {available}")] ExceedsBalance { total: Amount, available: Amount },
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)] Amount(#[from] AmountError),
    #[error(transparent)] Clr(#[from] ClrError),
    #[error(transparent)] Payout(#[from] PayoutError),
    #[error("serialization: {0}")] Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_amount_message_names_pair() {
        let err = ClrError::InvalidAmount {
            project_id: "proj".into(),
            donor_id: "alice".into(),
            source: AmountError::Negative("-5".into()),
        };
        assert_eq!(
            err.to_string(),
            "invalid amount from alice to proj: negative amount: -5"
        );
    }

    #[test]
    fn exceeds_balance_renders_decimal() {
        let err = PayoutError::ExceedsBalance {
            total: Amount::from(11u64),
            available: Amount::from(10u64),
        };
        assert_eq!(err.to_string(), "payouts exceed available balance: 11 > 10");
    }

    #[test]
    fn engine_error_wraps_clr() {
        let err: EngineError = ClrError::InvalidThreshold.into();
        assert!(matches!(err, EngineError::Clr(ClrError::InvalidThreshold)));
        assert_eq!(err.to_string(), "threshold must be positive");
    }

    #[test]
    fn engine_error_from_json() {
        let parse: Result<u8, _> = serde_json::from_str("not json");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::Serialization(_)));
    }
}
