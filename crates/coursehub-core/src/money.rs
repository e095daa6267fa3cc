//! # Money Module
//!
//! Provides the `Money` type for course prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing float prices:                                                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Cart subtotal, savings and the price filter all compare exact        │
//! │    integers, so "$500 and under" never misses a $500.00 course.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coursehub_core::money::Money;
//!
//! let price = Money::from_dollars(199);
//! let original = Money::from_dollars(299);
//!
//! assert_eq!(price.cents(), 19900);
//! assert_eq!((original - price).to_string(), "$100.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// Serialized as a bare integer of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars.
    ///
    /// The seeded catalog prices courses in whole dollars (`$199`).
    /// Amounts beyond the cent range saturate at `i64::MIN`/`i64::MAX`.
    ///
    /// ```rust
    /// use coursehub_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(149).cents(), 14900);
    /// ```
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars.saturating_mul(100))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
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

    /// Percentage of `self` that `part` represents, rounded half away from zero.
    ///
    /// Used for the "% OFF" badge, where `self` is the original price and
    /// `part` is the discount.
    ///
    /// ```rust
    /// use coursehub_core::money::Money;
    ///
    /// let original = Money::from_dollars(299);
    /// let discount = Money::from_dollars(100);
    /// assert_eq!(original.percentage(discount), 33);
    /// ```
    ///
    /// Returns 0 when `self` is zero.
    pub fn percentage(&self, part: Money) -> i64 {
        if self.0 == 0 {
            return 0;
        }
        let num = part.0 as i128 * 100;
        let den = self.0 as i128;
        let quotient = num / den;
        let remainder = num % den;
        let rounded = if 2 * remainder.abs() >= den.abs() {
            quotient + num.signum() * den.signum()
        } else {
            quotient
        };
        rounded as i64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats as `$12.34`. Localized formatting belongs to the UI layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
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
