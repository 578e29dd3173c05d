//! Money type with exact cent-level arithmetic
//!
//! This module provides a type-safe representation of monetary amounts
//! stored as integer cents, so that repeated arithmetic never accumulates
//! binary floating-point drift. Decimal values appear only at the
//! boundary (parsing, display, wire formats).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Negative amount: {0}")]
    Negative(Decimal),

    #[error("Sub-cent precision: {0}")]
    SubCentPrecision(Decimal),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Overflow during calculation")]
    Overflow,

    #[error("Cannot subtract {subtrahend} from {minuend}")]
    Underflow { minuend: Money, subtrahend: Money },
}

/// A non-negative monetary amount with fixed two-decimal precision
///
/// Money is stored as integer cents. All arithmetic is exact integer
/// arithmetic; conversions to and from `Decimal` happen only when a value
/// crosses a display or wire boundary, and reject fractional cents rather
/// than rounding them away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// The zero amount
    pub const ZERO: Money = Money { cents: 0 };

    /// Creates Money from an integer number of cents
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` if `cents` is negative.
    pub fn from_cents(cents: i64) -> Result<Self, MoneyError> {
        if cents < 0 {
            return Err(MoneyError::Negative(Decimal::new(cents, 2)));
        }
        Ok(Self { cents })
    }

    /// Creates Money from a decimal amount (e.g. `19.00`)
    ///
    /// # Errors
    ///
    /// - `MoneyError::Negative` if the amount is below zero
    /// - `MoneyError::SubCentPrecision` if the amount has more than two
    ///   decimal places
    /// - `MoneyError::Overflow` if the amount does not fit in 64-bit cents
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        let cents = amount * Decimal::ONE_HUNDRED;
        if cents.fract() != Decimal::ZERO {
            return Err(MoneyError::SubCentPrecision(amount));
        }
        let cents = cents.to_i64().ok_or(MoneyError::Overflow)?;
        Ok(Self { cents })
    }

    /// Returns the zero amount
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the amount in cents
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the amount as a two-decimal `Decimal`
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: Money) -> Result<Money, MoneyError> {
        let cents = self.cents.checked_add(other.cents).ok_or(MoneyError::Overflow)?;
        Ok(Money { cents })
    }

    /// Checked subtraction that fails rather than going below zero
    pub fn checked_sub(&self, other: Money) -> Result<Money, MoneyError> {
        if other.cents > self.cents {
            return Err(MoneyError::Underflow {
                minuend: *self,
                subtrahend: other,
            });
        }
        Ok(Money {
            cents: self.cents - other.cents,
        })
    }

    /// Multiplies by a whole quantity (e.g. unit price times item count)
    pub fn times(&self, quantity: u32) -> Result<Money, MoneyError> {
        let cents = self
            .cents
            .checked_mul(i64::from(quantity))
            .ok_or(MoneyError::Overflow)?;
        Ok(Money { cents })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s).map_err(|e| MoneyError::InvalidAmount(e.to_string()))?;
        Self::from_decimal(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(other).expect("Overflow in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(other).expect("Underflow in Money::sub")
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::from_decimal(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050).unwrap();
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.to_decimal(), dec!(10.50));
    }

    #[test]
    fn test_from_cents_rejects_negative() {
        let result = Money::from_cents(-1);
        assert!(matches!(result, Err(MoneyError::Negative(_))));
    }

    #[test]
    fn test_from_decimal() {
        let m = Money::from_decimal(dec!(4.50)).unwrap();
        assert_eq!(m.cents(), 450);
    }

    #[test]
    fn test_from_decimal_rejects_negative() {
        let result = Money::from_decimal(dec!(-0.01));
        assert!(matches!(result, Err(MoneyError::Negative(_))));
    }

    #[test]
    fn test_from_decimal_rejects_sub_cent() {
        let result = Money::from_decimal(dec!(1.005));
        assert!(matches!(result, Err(MoneyError::SubCentPrecision(_))));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000).unwrap();
        let b = Money::from_cents(450).unwrap();

        assert_eq!((a + b).cents(), 1450);
        assert_eq!((a - b).cents(), 550);
    }

    #[test]
    fn test_checked_sub_underflow() {
        let a = Money::from_cents(100).unwrap();
        let b = Money::from_cents(200).unwrap();

        let result = a.checked_sub(b);
        assert!(matches!(result, Err(MoneyError::Underflow { .. })));
    }

    #[test]
    fn test_times() {
        let unit = Money::from_decimal(dec!(4.50)).unwrap();
        assert_eq!(unit.times(2).unwrap().to_decimal(), dec!(9.00));
    }

    #[test]
    fn test_times_overflow() {
        let m = Money::from_cents(i64::MAX).unwrap();
        assert!(matches!(m.times(2), Err(MoneyError::Overflow)));
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Money::from_cents(1900).unwrap().to_string(), "19.00");
        assert_eq!(Money::from_cents(5).unwrap().to_string(), "0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        let m: Money = "12.34".parse().unwrap();
        assert_eq!(m.cents(), 1234);

        assert!("abc".parse::<Money>().is_err());
        assert!("-1.00".parse::<Money>().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let m = Money::from_cents(1234).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"12.34\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_no_drift_over_many_operations() {
        // 10,000 alternating additions and subtractions of 0.10 must land
        // exactly where integer arithmetic says they do.
        let dime = Money::from_decimal(dec!(0.10)).unwrap();
        let mut total = Money::from_cents(100_000).unwrap();

        for i in 0..10_000 {
            total = if i % 2 == 0 {
                total.checked_add(dime).unwrap()
            } else {
                total.checked_sub(dime).unwrap()
            };
        }

        assert_eq!(total.cents(), 100_000);
    }
}
