//! Arbitrary-precision monetary amount.
//!
//! Contribution amounts are blockchain-scale (10^24 smallest units per token),
//! so products of two amounts routinely exceed `u128`. [`Amount`] wraps a
//! [`BigUint`] and only ever rounds in two places, both toward zero:
//! - [`Amount::sqrt_product`]: `floor(sqrt(a * b))` on the exact product.
//! - [`Amount::mul_div_rem`]: `floor(a * m / d)`, remainder returned.
//!
//! Amounts cross process boundaries as decimal-integer strings.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use num_bigint::BigUint;
use num_integer::{Integer, Roots};
use num_traits::{ToPrimitive, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AmountError;

/// Non-negative integer amount in the smallest monetary unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

impl Amount {
    /// The zero amount.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Check if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Borrow the underlying big integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Consume into the underlying big integer.
    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    /// `floor(sqrt(self * other))`, computed on the exact product.
    ///
    /// # Examples
    ///
    /// ```
    /// use clr_core::Amount;
    /// let a = Amount::from(10_000_000u64);
    /// let b = Amount::from(5_000_000u64);
    /// assert_eq!(a.sqrt_product(&b), Amount::from(7_071_067u64));
    /// assert_eq!(a.sqrt_product(&a), a);
    /// ```
    pub fn sqrt_product(&self, other: &Amount) -> Amount {
        let product = &self.0 * &other.0;
        Amount(Roots::sqrt(&product))
    }

    /// `(floor(self * mul / div), (self * mul) mod div)`.
    ///
    /// Returns `None` when `div` is zero.
    pub fn mul_div_rem(&self, mul: &Amount, div: &Amount) -> Option<(Amount, Amount)> {
        if div.is_zero() {
            return None;
        }
        let (q, r) = (&self.0 * &mul.0).div_rem(&div.0);
        Some((Amount(q), Amount(r)))
    }

    /// `floor(self * mul / div)`. Returns `None` when `div` is zero.
    pub fn mul_div_floor(&self, mul: &Amount, div: &Amount) -> Option<Amount> {
        self.mul_div_rem(mul, div).map(|(q, _)| q)
    }

    /// `self - other`, or `None` if the result would be negative.
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        if self.0 >= other.0 {
            Some(Amount(&self.0 - &other.0))
        } else {
            None
        }
    }

    /// `self - other`, clamped at zero.
    pub fn saturating_sub(&self, other: &Amount) -> Amount {
        self.checked_sub(other).unwrap_or_default()
    }

    /// Narrow to `u128` if the value fits.
    pub fn to_u128(&self) -> Option<u128> {
        self.0.to_u128()
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parse a decimal-integer string. Surrounding ASCII whitespace is
    /// ignored; signs, decimal points, exponents and any other whitespace
    /// are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_matches(|c: char| c.is_ascii_whitespace());
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if s.starts_with('-') {
            return Err(AmountError::Negative(s.to_string()));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::NonNumeric(s.to_string()));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Amount)
            .ok_or_else(|| AmountError::NonNumeric(s.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<BigUint> for Amount {
    fn from(v: BigUint) -> Self {
        Self(v)
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<u128> for Amount {
    fn from(v: u128) -> Self {
        Self(BigUint::from(v))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl<'a> AddAssign<&'a Amount> for Amount {
    fn add_assign(&mut self, rhs: &'a Amount) {
        self.0 += &rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |mut acc, a| {
            acc += a;
            acc
        })
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Accepts decimal strings and non-negative JSON integers.
struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal integer string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        if v < 0 {
            return Err(E::custom(AmountError::Negative(v.to_string())));
        }
        Ok(Amount::from(v as u64))
    }

    /// serde_json hands integers above `u64::MAX` over as floats.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
            return Err(E::custom(AmountError::Unquoted(v.to_string())));
        }
        Err(E::custom(AmountError::NonNumeric(v.to_string())))
    }
}
