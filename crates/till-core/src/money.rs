//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! `Percentage` type used by rate-based discounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    4 × 60 × 0.2 = 48.00000000000001  ❌ WRONG!                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    24000 cents × 2000 bps / 10000 = 4800 cents  ✓                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::from_major_minor(75, 0); // $75.00
//!
//! let pair = price.multiply_quantity(2);      // $150.00
//! let total = pair - price;                    // $75.00
//! assert_eq!(total, price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction of discounts never needs a branch
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **sqlx transparent**: stored as a plain INTEGER column
///
/// ## Where Money is Used
/// ```text
/// CatalogItem.price ──► LineItem.unit_price ──► LineItem.line_total
///                                                     │
///                         DiscountRule::discount ─────┤
///                                                     ▼
///                                            LineItem.net_total ──► total()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(7500); // Represents $75.00
    /// assert_eq!(price.cents(), 7500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(price.cents(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -$5.50
    /// assert_eq!(negative.cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
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

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// Use [`checked_multiply_quantity`](Self::checked_multiply_quantity)
    /// where an out-of-range product must be reported.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Multiplies money by a quantity, `None` if the product leaves i64.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `rate` of this amount, rounding a half cent up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`, widened to i128 so a
    /// large line total cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::{Money, Percentage};
    ///
    /// let line = Money::from_cents(24000);           // 4 × $60.00
    /// let off = line.percentage_of(Percentage::from_bps(2000));
    /// assert_eq!(off.cents(), 4800);                 // $48.00
    /// ```
    pub fn percentage_of(&self, rate: Percentage) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Restricts the value to `[min, max]`.
    #[inline]
    pub fn clamp_between(self, min: Money, max: Money) -> Money {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$75.00` (debugging and CLI output).
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 2000 bps = 20% stays an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a rate from a whole percentage (20 → 20%).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        Percentage(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(7500)), "$75.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
    }

    #[test]
    fn test_multiply_quantity_out_of_range() {
        let price = Money::from_cents(4_000_000_000_000_000_000);

        assert_eq!(price.checked_multiply_quantity(2), Some(Money::from_cents(8_000_000_000_000_000_000)));
        assert_eq!(price.checked_multiply_quantity(3), None);
        assert_eq!(price.multiply_quantity(3), Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_percentage_of_exact() {
        // 3 × $60.00 at 20% = $36.00
        let line = Money::from_cents(18000);
        assert_eq!(line.percentage_of(Percentage::from_percent(20)).cents(), 3600);
    }

    #[test]
    fn test_percentage_of_rounds_half_cent_up() {
        // $0.03 at 50% = 1.5 cents → 2 cents
        let amount = Money::from_cents(3);
        assert_eq!(amount.percentage_of(Percentage::from_bps(5000)).cents(), 2);

        // $0.01 at 20% = 0.2 cents → 0 cents
        let amount = Money::from_cents(1);
        assert_eq!(amount.percentage_of(Percentage::from_bps(2000)).cents(), 0);
    }

    #[test]
    fn test_clamp_between() {
        let floor = Money::zero();
        let ceiling = Money::from_cents(500);

        assert_eq!(Money::from_cents(-10).clamp_between(floor, ceiling), floor);
        assert_eq!(Money::from_cents(900).clamp_between(floor, ceiling), ceiling);
        assert_eq!(
            Money::from_cents(250).clamp_between(floor, ceiling),
            Money::from_cents(250)
        );
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::from_bps(2000).to_string(), "20.00%");
        assert_eq!(Percentage::from_bps(825).to_string(), "8.25%");
        assert_eq!(Percentage::from_percent(20), Percentage::from_bps(2000));
    }
}
