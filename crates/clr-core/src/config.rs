//! Engine configuration.
//!
//! [`ClrConfig`] carries the CLR threshold, the matching pool, and the two
//! rounding decisions the allocation leaves open: how truncation leftovers are
//! handled when the pool is saturated, and whether an undersaturated pool is
//! scaled up to spend everything.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::constants::DEFAULT_THRESHOLD;
use crate::error::ClrError;

/// How scaled matching amounts are rounded when the pool is saturated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// `floor(raw * pool / total)`. Up to `projects - 1` units stay unallocated.
    #[default]
    Truncate,
    /// Truncate, then hand leftover units to the largest remainders
    /// (ties by project id ascending) so the pool is exhausted exactly.
    LargestRemainder,
}

/// What happens when the raw matching total is below the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndersaturationPolicy {
    /// Keep raw amounts; the leftover pool stays unspent.
    #[default]
    LeaveUnspent,
    /// Scale every project up proportionally so the whole pool is allocated.
    Redistribute,
}

impl FromStr for RoundingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "truncate" => Ok(Self::Truncate),
            "largest_remainder" => Ok(Self::LargestRemainder),
            other => Err(format!("unknown rounding policy: {other}")),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncate => f.write_str("truncate"),
            Self::LargestRemainder => f.write_str("largest-remainder"),
        }
    }
}

impl FromStr for UndersaturationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "leave_unspent" => Ok(Self::LeaveUnspent),
            "redistribute" => Ok(Self::Redistribute),
            other => Err(format!("unknown undersaturation policy: {other}")),
        }
    }
}

impl fmt::Display for UndersaturationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeaveUnspent => f.write_str("leave-unspent"),
            Self::Redistribute => f.write_str("redistribute"),
        }
    }
}

/// Parameters for one matching computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClrConfig {
    /// CLR threshold multiplying every pairwise term. Must be positive.
    pub threshold: Amount,
    /// Matching funds available for distribution.
    pub total_pool: Amount,
    #[serde(default)]
    pub rounding: RoundingPolicy,
    #[serde(default)]
    pub undersaturation: UndersaturationPolicy,
}

impl Default for ClrConfig {
    fn default() -> Self {
        Self {
            threshold: Amount::from(DEFAULT_THRESHOLD),
            total_pool: Amount::zero(),
            rounding: RoundingPolicy::default(),
            undersaturation: UndersaturationPolicy::default(),
        }
    }
}

impl ClrConfig {
    /// Build a config from threshold and pool amounts, default policies.
    pub fn new(threshold: Amount, total_pool: Amount) -> Self {
        Self {
            threshold,
            total_pool,
            ..Self::default()
        }
    }

    /// Parse threshold and pool from decimal-integer strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use clr_core::ClrConfig;
    /// let cfg = ClrConfig::from_strs("25000000", "5000000000000").unwrap();
    /// assert_eq!(cfg.threshold.to_string(), "25000000");
    /// assert!(ClrConfig::from_strs("0", "1").is_err());
    /// ```
    pub fn from_strs(threshold: &str, total_pool: &str) -> Result<Self, ClrError> {
        let threshold = threshold
            .parse()
            .map_err(|source| ClrError::InvalidParameter { name: "threshold", source })?;
        let total_pool = total_pool
            .parse()
            .map_err(|source| ClrError::InvalidParameter { name: "total_pool", source })?;
        let cfg = Self::new(threshold, total_pool);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_undersaturation(mut self, undersaturation: UndersaturationPolicy) -> Self {
        self.undersaturation = undersaturation;
        self
    }

    /// Reject configurations the allocator cannot run with.
    pub fn validate(&self) -> Result<(), ClrError> {
        if self.threshold.is_zero() {
            return Err(ClrError::InvalidThreshold);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmountError;

    #[test]
    fn default_threshold_is_25_tokens() {
        let cfg = ClrConfig::default();
        assert_eq!(cfg.threshold, Amount::from(DEFAULT_THRESHOLD));
        assert!(cfg.total_pool.is_zero());
    }

    #[test]
    fn default_policies() {
        let cfg = ClrConfig::default();
        assert_eq!(cfg.rounding, RoundingPolicy::Truncate);
        assert_eq!(cfg.undersaturation, UndersaturationPolicy::LeaveUnspent);
    }

    #[test]
    fn from_strs_parses_both() {
        let cfg = ClrConfig::from_strs("25", "5000").unwrap();
        assert_eq!(cfg.threshold, Amount::from(25u64));
        assert_eq!(cfg.total_pool, Amount::from(5000u64));
    }

    #[test]
    fn from_strs_rejects_zero_threshold() {
        assert_eq!(ClrConfig::from_strs("0", "5000"), Err(ClrError::InvalidThreshold));
    }

    #[test]
    fn from_strs_names_bad_parameter() {
        let err = ClrConfig::from_strs("25", "-1").unwrap_err();
        assert_eq!(
            err,
            ClrError::InvalidParameter {
                name: "total_pool",
                source: AmountError::Negative("-1".into()),
            }
        );
    }

    #[test]
    fn policy_parse_accepts_both_spellings() {
        assert_eq!("largest-remainder".parse(), Ok(RoundingPolicy::LargestRemainder));
        assert_eq!("largest_remainder".parse(), Ok(RoundingPolicy::LargestRemainder));
        assert_eq!("Truncate".parse(), Ok(RoundingPolicy::Truncate));
        assert_eq!("redistribute".parse(), Ok(UndersaturationPolicy::Redistribute));
        assert_eq!("leave-unspent".parse(), Ok(UndersaturationPolicy::LeaveUnspent));
        assert!("round-half-up".parse::<RoundingPolicy>().is_err());
    }

    #[test]
    fn policy_display_parses_back() {
        for p in [RoundingPolicy::Truncate, RoundingPolicy::LargestRemainder] {
            assert_eq!(p.to_string().parse::<RoundingPolicy>(), Ok(p));
        }
        for p in [UndersaturationPolicy::LeaveUnspent, UndersaturationPolicy::Redistribute] {
            assert_eq!(p.to_string().parse::<UndersaturationPolicy>(), Ok(p));
        }
    }

    #[test]
    fn config_json_uses_strings_and_defaults() {
        let cfg: ClrConfig =
            serde_json::from_str(r#"{"threshold":"25","total_pool":"100"}"#).unwrap();
        assert_eq!(cfg.rounding, RoundingPolicy::Truncate);
        let json = serde_json::to_value(cfg.with_rounding(RoundingPolicy::LargestRemainder))
            .unwrap();
        assert_eq!(json["threshold"], "25");
        assert_eq!(json["rounding"], "largest_remainder");
    }
}
