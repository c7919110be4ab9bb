//! Fixed-point money arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Money amount represented in cents to avoid floating point issues.
///
/// All price arithmetic in the order workflow goes through this type, so
/// line totals and order totals are exact. The store boundary converts
/// to and from `NUMERIC(10,2)` via [`Money::to_decimal`] and
/// [`Money::from_decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from a whole dollar value.
    pub fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents * quantity as i64,
        }
    }

    /// Converts to a two-decimal-place `Decimal` for the store boundary.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }

    /// Converts from a store-side `Decimal`.
    ///
    /// Returns `None` if the value carries sub-cent precision or does not
    /// fit in an `i64` cent count. Values read from a `NUMERIC(10,2)`
    /// column always convert.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        let cents = value * Decimal::ONE_HUNDRED;
        if cents.fract() != Decimal::ZERO {
            return None;
        }
        cents.to_i64().map(Self::from_cents)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dollars = (self.cents / 100).abs();
        let cents_part = self.cents.abs() % 100;
        if self.cents < 0 {
            write!(f, "-${dollars}.{cents_part:02}")
        } else {
            write!(f, "${dollars}.{cents_part:02}")
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents - rhs.cents,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(1234);
        assert_eq!(money.cents(), 1234);
    }

    #[test]
    fn test_money_from_dollars() {
        let money = Money::from_dollars(50);
        assert_eq!(money.cents(), 5000);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "$12.34");
        assert_eq!(Money::from_cents(100).to_string(), "$1.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-$12.34");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply(3).cents(), 3000);
    }

    #[test]
    fn test_decimal_roundtrip() {
        let money = Money::from_cents(1350);
        let decimal = money.to_decimal();
        assert_eq!(decimal.to_string(), "13.50");
        assert_eq!(Money::from_decimal(decimal), Some(money));
    }

    #[test]
    fn test_from_decimal_rejects_sub_cent_precision() {
        let value: Decimal = "10.005".parse().unwrap();
        assert_eq!(Money::from_decimal(value), None);
    }

    #[test]
    fn test_sum_is_exact() {
        // 2 x $5.00 + 1 x $3.50 must be exactly $13.50
        let total: Money = [
            Money::from_cents(500).multiply(2),
            Money::from_cents(350).multiply(1),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.cents(), 1350);
    }

    #[test]
    fn test_money_add_assign() {
        let mut money = Money::from_cents(100);
        money += Money::from_cents(50);
        assert_eq!(money.cents(), 150);
    }
}
