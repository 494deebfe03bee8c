use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::ParseMoneyError;

/// Two-decimal fixed-point amount stored as whole cents.
///
/// Serialised as a decimal number of currency units (`0.45`), the form the
/// data file has always used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

/// Largest amount whose cents survive a round trip through `f64`.
const MAX_EXACT_CENTS: u64 = 1 << 53;

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    fn from_units_f64(units: f64) -> Option<Self> {
        let cents = (units * 100.0).round();
        (units.is_finite() && cents >= 0.0 && cents <= MAX_EXACT_CENTS as f64)
            .then(|| Money(cents as u64))
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseMoneyError(text.to_owned());
        let (whole, frac) = text.trim().split_once('.').unwrap_or((text.trim(), ""));
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || frac.len() > 2 || !digits(whole) || !digits(frac) {
            return Err(malformed());
        }
        let units: u64 = whole.parse().map_err(|_| malformed())?;
        let cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| malformed())? * 10,
            _ => frac.parse::<u64>().map_err(|_| malformed())?,
        };
        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(malformed)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 > MAX_EXACT_CENTS {
            return serializer.serialize_str(&self.to_string());
        }
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative decimal amount such as 0.45")
    }

    fn visit_u64<E: de::Error>(self, units: u64) -> Result<Money, E> {
        units
            .checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount {units} is out of range")))
    }

    fn visit_i64<E: de::Error>(self, units: i64) -> Result<Money, E> {
        let units = u64::try_from(units)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(units), &self))?;
        self.visit_u64(units)
    }

    fn visit_f64<E: de::Error>(self, units: f64) -> Result<Money, E> {
        Money::from_units_f64(units)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Float(units), &self))
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<Money, E> {
        text.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
