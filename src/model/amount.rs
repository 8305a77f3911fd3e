//! Amount type for handling monetary values with optional currency symbols.
//!
//! This module provides the `Amount` type which wraps `Decimal`, parses user-entered values that
//! may carry a currency symbol and thousands separators, and persists itself as a JSON number.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// The currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Currency symbols that are stripped from the front of an amount before parsing.
const CURRENCY_SYMBOLS: &[char] = &['₹', '$'];

/// Represents a monetary amount.
///
/// Equality and ordering are numeric, so `4.50` and `4.5` are the same amount.
///
/// # Examples
///
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("₹1,250.50").unwrap();
/// let b = Amount::from_str("1250.5").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "₹1,250.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// Wraps `value` as given. Amounts parsed from text or JSON are instead limited to what
    /// survives being written out as a JSON number, see [`Amount::from_str`].
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// The value this amount has after being written as a JSON number and read back, or `None`
    /// if it cannot be written as one.
    fn storable(value: Decimal) -> Option<Decimal> {
        to_f64(value).and_then(from_f64)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Formats the amount with `symbol`, thousands separators and two decimal places, e.g.
    /// `₹1,234.50` or `-$3.00`.
    pub fn display_with(&self, symbol: &str) -> String {
        let (sign, num) = if self.value.is_sign_negative() && !self.value.is_zero() {
            ("-", self.value.abs())
        } else {
            ("", self.value)
        };
        let rounded = num.round_dp(2);
        format!(
            "{sign}{symbol}{}",
            format_num::format_num!(",.2", rounded.to_f64().unwrap_or_default())
        )
    }
}

/// An error that can occur when parsing strings into `Amount` values.
#[derive(Debug)]
pub enum AmountError {
    /// Nothing was left to parse after trimming.
    Empty,
    /// The text is not a decimal number.
    Invalid(rust_decimal::Error),
    /// A sign appears where a digit or currency symbol was expected, e.g. `--5` or `₹-5`.
    Malformed,
    /// The number is too large or too small to be stored.
    OutOfRange,
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Empty => write!(f, "amount is empty"),
            AmountError::Invalid(e) => write!(f, "amount is not a number: {e}"),
            AmountError::Malformed => write!(f, "amount has a misplaced sign"),
            AmountError::OutOfRange => write!(f, "amount is out of range"),
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AmountError::Empty | AmountError::Malformed | AmountError::OutOfRange => None,
            AmountError::Invalid(e) => Some(e),
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // One leading sign, then an optional currency symbol: "₹50", "-₹50" and "+50" are accepted
        let (negative, unsigned) = match trimmed.strip_prefix(['-', '+']) {
            Some(rest) => (trimmed.starts_with('-'), rest),
            None => (false, trimmed),
        };
        let unsigned = unsigned
            .strip_prefix(CURRENCY_SYMBOLS)
            .unwrap_or(unsigned)
            .trim_start();
        if unsigned.starts_with(['-', '+']) {
            return Err(AmountError::Malformed);
        }

        // Remove commas (thousand separators)
        let digits = unsigned.replace(',', "");
        if digits.is_empty() {
            return Err(AmountError::Empty);
        }

        let value = Decimal::from_str(&digits).or_else(|e| {
            if digits.contains(['e', 'E']) {
                Decimal::from_scientific(&digits).map_err(|_| AmountError::Invalid(e))
            } else {
                Err(AmountError::Invalid(e))
            }
        })?;
        let value = if negative { -value } else { value };
        Amount::storable(value)
            .map(Amount::new)
            .ok_or(AmountError::OutOfRange)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.value + rhs.value)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Persisted as a plain JSON number
        let f = to_f64(self.value)
            .ok_or_else(|| S::Error::custom(format!("{} overflows f64", self.value)))?;
        serializer.serialize_f64(f)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Accepts a JSON number, or a numeric string for hand-edited data.
struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        storable_or_error(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        storable_or_error(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        from_f64(v)
            .map(Amount::new)
            .ok_or_else(|| E::custom(format!("{v} is out of range for an amount")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }
}

fn storable_or_error<E: de::Error>(value: Decimal) -> Result<Amount, E> {
    Amount::storable(value)
        .map(Amount::new)
        .ok_or_else(|| E::custom(format!("{value} is out of range for an amount")))
}

/// The nearest f64, parsed from the decimal text so the result is correctly rounded.
fn to_f64(value: Decimal) -> Option<f64> {
    f64::from_str(&value.to_string())
        .ok()
        .filter(|f| f.is_finite())
}

/// The shortest decimal text of an f64 is exactly what reads back as the same f64.
fn from_f64(v: f64) -> Option<Decimal> {
    Decimal::from_str(&v.to_string())
        .or_else(|_| Decimal::from_scientific(&format!("{v:e}")))
        .ok()
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
