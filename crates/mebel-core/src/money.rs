//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A catalog snapshot rewritten on every mutation would accumulate        │
//! │  that drift every time a price is read back and written out again.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "3500000.00" ──parse──► 350000000 cents ──write──► "3500000.00"      │
//! │    Round-trips are exact, totals are exact                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mebel_core::money::Money;
//!
//! // Parse from decimal text (files, command line)
//! let price: Money = "3500000".parse().unwrap();
//! assert_eq!(price.to_string(), "3500000.00");
//!
//! // Arithmetic is checked; overflow is reported, never wrapped
//! let total = price.checked_mul_quantity(2).unwrap();
//! assert_eq!(total, Money::from_major(7_000_000));
//! assert!(price.checked_mul_quantity(i64::MAX).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Arithmetic is checked and reports overflow as `None`
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: serde serializes the raw cent count (JSON output)
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  ProductRecord.unit_price ──┬──► TransactionRecord.unit_price (frozen)  │
/// │                             │          │                                │
/// │                             │          ▼                                │
/// │                             │    TransactionRecord.total                │
/// │                             │                                           │
/// │                             └──► InventoryReport.total_value            │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use mebel_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use mebel_core::money::Money;
    ///
    /// let price = Money::from_major(250_000);
    /// assert_eq!(price.cents(), 25_000_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use mebel_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Sofa Minimalis 3 Seater  3500000.00
    /// Quantity: 2
    ///      │
    ///      ▼
    /// checked_mul_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Transaction total: 7000000.00
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal text such as `3500000`, `3500000.0` or `12.345`.
///
/// ## Rounding
/// Digits past the second fraction digit are rounded half-up (away from
/// zero): `12.345` → `12.35`, `12.344` → `12.34`. This is the only
/// rounding the system performs.
///
/// ## Rejected Input
/// Empty text, exponents, thousands separators, and anything that is not
/// `[-+]digits[.digits]`.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (major_str, minor_str) = digits.split_once('.').unwrap_or((digits, ""));

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(invalid("expected a decimal number"));
        }
        if !major_str.bytes().all(|b| b.is_ascii_digit())
            || !minor_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected a decimal number"));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| invalid("value is too large"))?
        };

        let mut fraction = minor_str.bytes().map(|b| i64::from(b - b'0'));
        let tens = fraction.next().unwrap_or(0);
        let ones = fraction.next().unwrap_or(0);
        let round_up = fraction.next().is_some_and(|d| d >= 5);

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(tens * 10 + ones + i64::from(round_up)))
            .ok_or_else(|| invalid("value is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal with two fraction digits, no currency symbol.
///
/// This is the exact text written into the catalog and ledger files, so
/// `Display` followed by `FromStr` is lossless.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_major(3_500_000).to_string(), "3500000.00");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_parse_accepts_integer_and_float_text() {
        // Older snapshots wrote prices either way
        assert_eq!("3500000".parse::<Money>().unwrap(), Money::from_major(3_500_000));
        assert_eq!("3500000.0".parse::<Money>().unwrap(), Money::from_major(3_500_000));
        assert_eq!(" 10.5 ".parse::<Money>().unwrap(), Money::from_cents(1050));
        assert_eq!(".75".parse::<Money>().unwrap(), Money::from_cents(75));
        assert_eq!("-5.50".parse::<Money>().unwrap(), Money::from_cents(-550));
    }

    #[test]
    fn test_parse_rounds_half_up() {
        assert_eq!("12.345".parse::<Money>().unwrap(), Money::from_cents(1235));
        assert_eq!("12.344".parse::<Money>().unwrap(), Money::from_cents(1234));
        assert_eq!("0.999".parse::<Money>().unwrap(), Money::from_cents(100));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1,000".parse::<Money>().is_err());
        assert!("1e6".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_display_parse_is_lossless() {
        for cents in [0, 1, 99, 100, 12_345, 350_000_000, -42] {
            let money = Money::from_cents(cents);
            assert_eq!(money.to_string().parse::<Money>().unwrap(), money);
        }
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_cents(1000);

        assert_eq!(price.checked_mul_quantity(3), Some(Money::from_cents(3000)));
        assert_eq!(price.checked_add(Money::from_cents(500)), Some(Money::from_cents(1500)));
    }

    #[test]
    fn test_overflow_is_none() {
        let huge: Money = "92233720368547758.07".parse().unwrap();

        assert_eq!(huge.cents(), i64::MAX);
        assert!(huge.checked_mul_quantity(2).is_none());
        assert!(huge.checked_add(Money::from_cents(1)).is_none());
    }

    #[test]
    fn test_negative() {
        assert!(!Money::zero().is_negative());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");
    }
}
