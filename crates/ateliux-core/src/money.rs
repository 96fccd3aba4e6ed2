//! # Money Module
//!
//! Provides the `Money` type for prices, subtotals, fees and discounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Catalog price 29.90 stored as a float:                                 │
//! │    29.9 * 3 = 89.69999999999999  ❌ shows "$89.69" if truncated          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2990 cents * 3 = 8970 cents = "$89.70"                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ateliux_core::money::Money;
//!
//! let price = Money::from_cents(2990); // $29.90
//! let line = price * 3;
//! assert_eq!(line.to_string(), "$89.70");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that discounts can be expressed and subtracted without
/// special cases. Serialized as a bare integer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use ateliux_core::money::Money;
    ///
    /// let price = Money::from_cents(1990); // $19.90
    /// assert_eq!(price.cents(), 1990);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion as an absolute value (0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero dollars.
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

    /// Multiplies a unit price by a line quantity, saturating at the
    /// `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns `bps` basis points of this amount, rounded half up.
    ///
    /// ## Example
    /// ```rust
    /// use ateliux_core::money::Money;
    ///
    /// // 10% of $123.45 = $12.345 → $12.35
    /// let ten_percent = Money::from_cents(12345).percentage(1000);
    /// assert_eq!(ten_percent.cents(), 1235);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 so large subtotals cannot overflow the intermediate product
        let cents = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(cents as i64)
    }

    /// Clamps negative amounts to zero.
    #[inline]
    pub fn non_negative(self) -> Money {
        self.max(Money::zero())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
// Arithmetic saturates at the i64 bounds.

/// Renders as `$12.34` / `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
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
