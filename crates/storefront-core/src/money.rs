//! # Money Module
//!
//! Provides the `Money` type for cart prices and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog fixture stores prices as JSON numbers:                     │
//! │    "price": 9.99                                                        │
//! │                                                                         │
//! │  Summing those as floats drifts:                                        │
//! │    9.99 × 3 = 29.970000000000002                                        │
//! │                                                                         │
//! │  OUR SOLUTION: convert once, at the fixture boundary                    │
//! │    Money::from_fixture_price(9.99) = 999 cents                          │
//! │    999 × 3 = 2997 cents, exactly                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_fixture_price(9.99);
//! assert_eq!(price.cents(), 999);
//! assert_eq!((price * 3).to_string(), "$29.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

use crate::MAX_UNIT_PRICE_CENTS;

/// A monetary value in cents. Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal fixture price into cents.
    ///
    /// This is the only place a float enters the money path. Rounds half
    /// away from zero and clamps into `0..=MAX_UNIT_PRICE_CENTS`;
    /// non-finite input maps to zero.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::MAX_UNIT_PRICE_CENTS;
    ///
    /// assert_eq!(Money::from_fixture_price(549.0).cents(), 54900);
    /// assert_eq!(Money::from_fixture_price(0.005).cents(), 1);
    /// assert_eq!(Money::from_fixture_price(f64::NAN).cents(), 0);
    /// assert_eq!(Money::from_fixture_price(1e300).cents(), MAX_UNIT_PRICE_CENTS);
    /// ```
    pub fn from_fixture_price(price: f64) -> Self {
        if !price.is_finite() {
            return Money::zero();
        }
        let cents = (price * 100.0)
            .round()
            .clamp(0.0, MAX_UNIT_PRICE_CENTS as f64);
        Money(cents as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a line quantity, saturating at the
    /// `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1250 = 12.5%)
    ///
    /// The discount itself is rounded half up, so the customer never pays
    /// a fraction of a cent more than the listed percentage implies.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(999); // $9.99
    /// let discounted = price.apply_percentage_discount(717); // 7.17% off
    /// assert_eq!(discounted.cents(), 927);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let discount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        let discounted = (self.0 as i128 - discount).clamp(i64::MIN as i128, i64::MAX as i128);
        Money(discounted as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        // unsigned_abs: i64::MIN has no positive i64 counterpart
        let text = format!(
            "{}${}.{:02}",
            sign,
            (self.0 / 100).unsigned_abs(),
            self.cents_part()
        );
        f.pad(&text)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fixture_price() {
        assert_eq!(Money::from_fixture_price(9.99).cents(), 999);
        assert_eq!(Money::from_fixture_price(1899.99).cents(), 189999);
        assert_eq!(Money::from_fixture_price(0.0).cents(), 0);
        assert_eq!(Money::from_fixture_price(f64::INFINITY).cents(), 0);
    }

    #[test]
    fn test_fixture_price_is_clamped() {
        assert_eq!(Money::from_fixture_price(1e300).cents(), MAX_UNIT_PRICE_CENTS);
        assert_eq!(Money::from_fixture_price(-4.99).cents(), 0);
    }

    #[test]
    fn test_arithmetic_never_panics_on_overflow() {
        let max = Money::from_cents(i64::MAX);

        assert_eq!((max * 2).cents(), i64::MAX);
        assert_eq!(max.multiply_quantity(i64::MAX).cents(), i64::MAX);
        assert_eq!((max + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);

        let total: Money = vec![max, max].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        assert_eq!(max.checked_multiply_quantity(2), None);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(250).checked_multiply_quantity(4),
            Some(Money::from_cents(1000))
        );
    }

    #[test]
    fn test_display_honors_width() {
        assert_eq!(format!("{:>8}", Money::from_cents(999)), "   $9.99");
        assert_eq!(format!("{:<8}|", Money::from_cents(999)), "$9.99   |");
        assert_eq!(Money::from_cents(i64::MIN).to_string(), "-$92233720368547758.08");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);

        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((b * 4).cents(), 1000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 1500);
    }

    #[test]
    fn test_percentage_discount() {
        let price = Money::from_cents(10000);
        assert_eq!(price.apply_percentage_discount(1000).cents(), 9000);
        assert_eq!(price.apply_percentage_discount(0), price);
    }

    #[test]
    fn test_serializes_as_integer_cents() {
        let json = serde_json::to_string(&Money::from_cents(999)).unwrap();
        assert_eq!(json, "999");
    }
}
