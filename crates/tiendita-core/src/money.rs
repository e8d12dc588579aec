//! # Money Module
//!
//! Provides the `Money` type for handling peso amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A cashier taps the 50 centavo coin sixty times:                        │
//! │    0.5 + 0.5 + ... (binary floats) may drift away from 30.00           │
//! │    and 0.1 + 0.2 = 0.30000000000000004                                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    50 cents × 60 = 3000 cents = $30.00, always                         │
//! │                                                                         │
//! │  Decimals only exist at the edges: parsing what the UI sends us and    │
//! │  formatting what we send back.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiendita_core::money::Money;
//!
//! let price = Money::from_cents(3750);       // $37.50
//! let parsed = Money::parse("37.5").unwrap(); // from a URL parameter
//! assert_eq!(price, parsed);
//!
//! let doubled = price * 2_i64;                // $75.00
//! assert_eq!(doubled.to_string(), "$75.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Cents per peso.
const CENTS_PER_UNIT: i64 = 100;

/// Largest magnitude accepted from text or floats: one quadrillion pesos.
const MAX_CENTS: i64 = 100_000_000_000_000_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (centavos).
///
/// ## Design Decisions
/// - **i64 (signed)**: a shortfall or an overshoot can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde**: serialized as the raw cent count
/// - **Saturating ops**: arithmetic clamps at the i64 range instead of wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// The largest amount [`Money::parse`] and [`Money::from_decimal`] accept.
    pub const MAX: Money = Money(MAX_CENTS);

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use tiendita_core::money::Money;
    ///
    /// let coin = Money::from_cents(50); // 50 centavos
    /// assert_eq!(coin.cents(), 50);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole pesos.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * CENTS_PER_UNIT)
    }

    /// Parses decimal text such as `"37.50"`, `"37.5"`, `"$20"` or `"-5"`.
    ///
    /// Digits past the second fraction digit are rounded half-up on the cent
    /// boundary (away from zero for negative amounts). Magnitudes above
    /// [`Money::MAX`] are rejected.
    ///
    /// ## Example
    /// ```rust
    /// use tiendita_core::money::Money;
    ///
    /// assert_eq!(Money::parse("37.5").unwrap().cents(), 3750);
    /// assert_eq!(Money::parse("1.005").unwrap().cents(), 101);
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let text = input.trim();
        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let text = text.strip_prefix('$').unwrap_or(text);

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected digits with an optional decimal point"));
        }

        let mut cents: i64 = 0;
        for digit in whole.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i64::from(digit - b'0')))
                .ok_or_else(|| invalid("amount is too large"))?;
        }

        let mut fraction_digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = fraction_digits.next().unwrap_or(0);
        let hundredths = fraction_digits.next().unwrap_or(0);
        let round_up = fraction_digits.next().is_some_and(|d| d >= 5);

        cents = cents
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .filter(|&c| c <= MAX_CENTS)
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Converts a raw float arriving from the UI into cents.
    ///
    /// The float is rendered as its shortest round-trip decimal text and then
    /// parsed with [`Money::parse`], so `0.1 + 0.2` lands on 30 cents.
    ///
    /// ## Errors
    /// `InvalidAmount` for NaN and infinities.
    pub fn from_decimal(value: f64) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(CoreError::InvalidAmount {
                input: value.to_string(),
                reason: "amount must be a finite number".to_string(),
            });
        }
        Money::parse(&value.to_string())
    }

    /// Like [`Money::from_decimal`], but refuses values with sub-cent digits
    /// instead of rounding them (`0.501` is not `0.50`).
    ///
    /// ## Example
    /// ```rust
    /// use tiendita_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal_exact(0.5).unwrap().cents(), 50);
    /// assert!(Money::from_decimal_exact(0.501).is_err());
    /// ```
    pub fn from_decimal_exact(value: f64) -> CoreResult<Self> {
        let text = value.to_string();
        if let Some((_, fraction)) = text.split_once('.') {
            if fraction.len() > 2 {
                return Err(CoreError::InvalidAmount {
                    input: text,
                    reason: "more than two decimal places".to_string(),
                });
            }
        }
        Money::from_decimal(value)
    }

    /// Returns the amount as a float, for wire output only.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole pesos portion.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `self - other`, or zero when `other` is larger.
    ///
    /// ## Example
    /// ```rust
    /// use tiendita_core::money::Money;
    ///
    /// let paid = Money::from_pesos(50);
    /// let total = Money::from_cents(3750);
    /// assert_eq!(paid.saturating_sub(total).cents(), 1250);
    /// assert!(total.saturating_sub(paid).is_zero());
    /// ```
    #[inline]
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// How many whole `unit`s fit in this amount (non-positive units fit zero times).
    #[inline]
    pub fn units_of(&self, unit: Money) -> u64 {
        if unit.0 <= 0 || self.0 < unit.0 {
            return 0;
        }
        (self.0 / unit.0) as u64
    }

    /// How many `unit`s are needed to cover this amount, rounding up.
    #[inline]
    pub fn units_to_cover(&self, unit: Money) -> u64 {
        if unit.0 <= 0 || self.0 <= 0 {
            return 0;
        }
        let whole = self.0 / unit.0;
        let partial = u64::from(self.0 % unit.0 != 0);
        whole as u64 + partial
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the register screen does: `$37.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.pesos().abs(), self.cents_part())
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

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Multiplication by a unit count.
impl Mul<u64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: u64) -> Self {
        match i64::try_from(count) {
            Ok(count) => self * count,
            Err(_) if self.0 < 0 => Money(i64::MIN),
            Err(_) if self.0 > 0 => Money(i64::MAX),
            Err(_) => Money::zero(),
        }
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(3750);
        assert_eq!(money.cents(), 3750);
        assert_eq!(money.pesos(), 37);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(3750)), "$37.50");
        assert_eq!(format!("{}", Money::from_pesos(65)), "$65.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(50)), "$0.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_parse_plain_and_prefixed() {
        assert_eq!(Money::parse("37.50").unwrap().cents(), 3750);
        assert_eq!(Money::parse("37.5").unwrap().cents(), 3750);
        assert_eq!(Money::parse(" 20 ").unwrap().cents(), 2000);
        assert_eq!(Money::parse("$0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("5.").unwrap().cents(), 500);
        assert_eq!(Money::parse("-5").unwrap().cents(), -500);
    }

    #[test]
    fn test_parse_rounds_half_up_on_cent_boundary() {
        assert_eq!(Money::parse("1.005").unwrap().cents(), 101);
        assert_eq!(Money::parse("1.004").unwrap().cents(), 100);
        assert_eq!(Money::parse("1.0049999").unwrap().cents(), 100);
        assert_eq!(Money::parse("-1.005").unwrap().cents(), -101);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "   ", ".", "abc", "1.2.3", "1,50", "--5", "5-"] {
            let err = Money::parse(input).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidAmount { .. }),
                "expected InvalidAmount for {input:?}"
            );
        }
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_accepts_up_to_max() {
        assert_eq!(Money::parse("1000000000000000").unwrap(), Money::MAX);
        assert_eq!(Money::parse("-1000000000000000").unwrap().cents(), -MAX_CENTS);
        assert!(Money::parse("1000000000000000.01").is_err());
        assert!(Money::from_decimal(1e16).is_err());
    }

    #[test]
    fn test_from_decimal_absorbs_float_drift() {
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal(37.5).unwrap().cents(), 3750);
        assert!(Money::from_decimal(f64::NAN).is_err());
        assert!(Money::from_decimal(f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_decimal_exact_rejects_sub_cent_digits() {
        assert_eq!(Money::from_decimal_exact(20.0).unwrap().cents(), 2000);
        assert_eq!(Money::from_decimal_exact(37.5).unwrap().cents(), 3750);
        for value in [0.501, 20.004, 0.1 + 0.2] {
            let err = Money::from_decimal_exact(value).unwrap_err();
            assert!(matches!(err, CoreError::InvalidAmount { .. }), "{value}");
        }
        assert!(Money::from_decimal_exact(f64::NAN).is_err());
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let top = Money::from_cents(i64::MAX);
        let bottom = Money::from_cents(i64::MIN);
        assert_eq!(top + Money::from_cents(1), top);
        assert_eq!(bottom - Money::from_cents(1), bottom);
        assert_eq!(top * 2_i64, top);
        assert_eq!(Money::from_cents(50) * u64::MAX, top);
        assert_eq!(top.saturating_sub(bottom), top);
        assert!(bottom.saturating_sub(top).is_zero());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3_u64).cents(), 3000);
        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_unit_counting() {
        let amount = Money::from_cents(3750);
        assert_eq!(amount.units_of(Money::from_pesos(20)), 1);
        assert_eq!(amount.units_of(Money::from_pesos(50)), 0);
        assert_eq!(Money::from_cents(30).units_to_cover(Money::from_cents(50)), 1);
        assert_eq!(Money::from_cents(100).units_to_cover(Money::from_cents(50)), 2);
        assert_eq!(Money::zero().units_to_cover(Money::from_cents(50)), 0);

        let top = Money::from_cents(i64::MAX);
        assert_eq!(top.units_of(Money::from_cents(1)), i64::MAX as u64);
        assert_eq!(top.units_to_cover(Money::from_cents(50)), (i64::MAX / 50 + 1) as u64);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
