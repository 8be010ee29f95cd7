//! Exact decimal amount used for every balance in the ledger.
//!
//! Wraps `rust_decimal` without forcing a scale, so the digits of the input
//! are carried through arithmetic untouched: `1000.12345 - 100` is
//! `900.12345`, never a binary floating point approximation.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A monetary amount with exact decimal arithmetic.
///
/// Equality and ordering are numeric, so `1.0 == 1.00`. `Hash` agrees with
/// equality.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use bank_ledger::Money;
///
/// let balance = Money::from_str("1000.12345").unwrap();
/// let amount = Money::from_str("100").unwrap();
/// assert_eq!((balance - amount).to_string(), "900.12345");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Wraps a `Decimal` as is, keeping its scale.
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns the underlying decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Adds `rhs`, returning `None` if the result does not fit the decimal mantissa.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Subtracts `rhs`, returning `None` if the result does not fit the decimal mantissa.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money::new(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Money(Decimal::from(value))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    /// Parses a plain decimal string. Inputs with more digits than the
    /// mantissa holds are rejected instead of being rounded.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str_exact(trimmed)?;
        Ok(Money(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_from_str_keeps_input_scale() {
        assert_eq!(money("1000.12345").to_string(), "1000.12345");
        assert_eq!(money("100").to_string(), "100");
        assert_eq!(money("  2.50  ").to_string(), "2.50");
        assert_eq!(money("-0.0001").to_string(), "-0.0001");
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("abc").is_err());
        assert!(Money::from_str("1.2.3").is_err());
    }

    #[test]
    fn test_arithmetic_is_exact() {
        assert_eq!((money("1000.12345") - money("100")).to_string(), "900.12345");
        assert_eq!((money("0.1") + money("0.2")).to_string(), "0.3");
        assert_eq!((money("1000") - money("300")).to_string(), "700");
    }

    #[test]
    fn test_repeated_small_additions_do_not_drift() {
        let mut total = Money::ZERO;
        for _ in 0..1000 {
            total = total + money("0.001");
        }
        assert_eq!(total, money("1"));
    }

    #[test]
    fn test_equality_and_hash_ignore_scale() {
        assert_eq!(money("1.0"), money("1.00"));

        let mut set = HashSet::new();
        set.insert(money("1.0"));
        assert!(set.contains(&money("1.000")));
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Money::new(Decimal::MAX);
        assert!(max.checked_add(money("1")).is_none());
        assert_eq!(money("1").checked_add(money("2")), Some(money("3")));
    }

    #[test]
    fn test_sign_helpers() {
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_negative());
        assert!(money("-5").is_negative());
        assert!(!money("5").is_negative());
    }
}
