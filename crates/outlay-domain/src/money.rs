//! Fixed-point monetary amounts.
//!
//! Amounts are stored as signed 64-bit minor units (cents), so balance
//! arithmetic stays exact across any sequence of postings and reversals.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A monetary amount in minor units (hundredths of the currency unit).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Builds an amount from whole units and a 0-99 minor part.
    pub const fn from_units(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Divides the amount evenly over `days`, truncating toward zero.
    pub const fn per_day(self, days: i64) -> Self {
        Self(self.0 / days)
    }

    /// Fraction of `total` this amount represents. Display-only; balances
    /// never flow through floating point.
    pub fn ratio_of(self, total: Self) -> f64 {
        self.0 as f64 / total.0 as f64
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Parses `"12"`, `"12.3"`, `"12.34"`, or `"-4.50"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        if body.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        let cents = match body.split_once('.') {
            Some((units, minor)) => {
                if minor.is_empty() || minor.len() > 2 || !digits_only(units) || !digits_only(minor)
                {
                    return Err(invalid());
                }
                let units: i64 = units.parse().map_err(|_| invalid())?;
                let mut minor_value: i64 = minor.parse().map_err(|_| invalid())?;
                if minor.len() == 1 {
                    minor_value *= 10;
                }
                units * 100 + minor_value
            }
            None => {
                if !digits_only(body) {
                    return Err(invalid());
                }
                body.parse::<i64>().map_err(|_| invalid())? * 100
            }
        };
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, amount| acc + amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors that can occur when parsing [`Money`] values.
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(raw) => write!(f, "invalid money amount `{}`", raw),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_formats() {
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_cents(1200));
        assert_eq!("12.3".parse::<Money>().unwrap(), Money::from_cents(1230));
        assert_eq!("12.34".parse::<Money>().unwrap(), Money::from_cents(1234));
        assert_eq!("-4.50".parse::<Money>().unwrap(), Money::from_cents(-450));
        assert_eq!("0.05".parse::<Money>().unwrap(), Money::from_cents(5));
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["", "-", "12.345", "12.", "1.2.3", "12.-3", "+5", "ten", "$5"] {
            assert!(raw.parse::<Money>().is_err(), "`{}` should not parse", raw);
        }
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Money::from_cents(1234).to_string(), "12.34");
        assert_eq!(Money::from_cents(-450).to_string(), "-4.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn sums_exactly() {
        let amounts = [
            Money::from_cents(10),
            Money::from_cents(20),
            Money::from_cents(1),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total, Money::from_cents(31));
    }

    #[test]
    fn round_trips_through_serde() {
        let amount = Money::from_cents(9999);
        let encoded = serde_json::to_string(&amount).unwrap();
        assert_eq!(encoded, "9999");
        let decoded: Money = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, amount);
    }
}
