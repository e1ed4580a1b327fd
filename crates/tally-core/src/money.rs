//! # Money Module
//!
//! Provides the `Money` type for monetary values in whole currency units.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    330 / 1.1 = 299.99999999999994  ❌ floor → 299                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer units, exact ratios                              │
//! │    330 × 10000 / 11000 = 300        ✅ floor → 300                      │
//! │    Rounding happens exactly once, by an explicit RoundingPolicy         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_units(1000);
//! let total = price.checked_add(Money::from_units(100)).unwrap();
//! assert_eq!(total.units(), 1100);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{TaxError, TaxResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and returns
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Newtype serde**: `Money(1100)` is the JSON number `1100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, failing instead of wrapping.
    pub fn checked_add(self, other: Money) -> TaxResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(TaxError::Overflow { operation: "addition" })
    }

    /// Subtracts `other`, failing instead of wrapping.
    pub fn checked_sub(self, other: Money) -> TaxResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(TaxError::Overflow {
                operation: "subtraction",
            })
    }

    /// Narrows an exact intermediate back to an amount.
    pub(crate) fn try_from_wide(value: i128, operation: &'static str) -> TaxResult<Money> {
        i64::try_from(value)
            .map(Money)
            .map_err(|_| TaxError::Overflow { operation })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain integer; currency symbols and grouping belong to the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Money(units)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
