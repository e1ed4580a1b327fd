//! # Domain Types
//!
//! Rate and result types shared by the tax calculator and its callers.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐     │
//! │  │    TaxRate      │   │ InclusiveAmounts │   │ ExclusiveAmounts │     │
//! │  │  ─────────────  │   │  ──────────────  │   │  ──────────────  │     │
//! │  │  bps (u32)      │   │  tax             │   │  excluding       │     │
//! │  │  1000 = 10%     │   │  including       │   │  tax             │     │
//! │  └─────────────────┘   └──────────────────┘   └──────────────────┘     │
//! │                                                                         │
//! │  ┌─────────────────────────┐   ┌─────────────────┐                     │
//! │  │    RoundTripCheck       │   │ RoundingWarning │                     │
//! │  │  ─────────────────────  │   │  ─────────────  │                     │
//! │  │  excluding              │   │  entered        │                     │
//! │  │  recalculated_including │   │  recalculated   │                     │
//! │  │  discrepancy            │   │  discrepancy    │                     │
//! │  └─────────────────────────┘   └─────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10%, 800 bps = 8%
///
/// Rates are unsigned, so `1 + rate` is always positive and the
/// inclusive-to-exclusive division is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Basis points in 100%.
    pub const BPS_PER_UNIT: u32 = 10_000;

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole percentage (10 → 10%).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        TaxRate(pct.saturating_mul(100))
    }

    /// Creates a tax rate from a fractional percentage, refusing any value
    /// that is not a whole number of basis points.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::try_from_percentage(8.25).unwrap().bps(), 825);
    /// assert!(TaxRate::try_from_percentage(8.125).is_err());
    /// ```
    pub fn try_from_percentage(pct: f64) -> Result<Self, ValidationError> {
        if !pct.is_finite() || pct < 0.0 {
            return Err(ValidationError::InvalidFormat {
                field: "tax_rate".to_string(),
                reason: format!("must be a non-negative number, got {pct}"),
            });
        }

        let scaled = pct * 100.0;
        let bps = scaled.round();
        // 8.13 * 100.0 == 813.0000000000001
        if (scaled - bps).abs() > 1e-6 {
            return Err(ValidationError::InvalidFormat {
                field: "tax_rate".to_string(),
                reason: format!("{pct}% is finer than 0.01%"),
            });
        }
        if bps > u32::MAX as f64 {
            return Err(ValidationError::OutOfRange {
                field: "tax_rate".to_string(),
                min: 0,
                max: u32::MAX as i64,
            });
        }

        Ok(TaxRate(bps as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Conversion Results
// =============================================================================

/// Result of adding tax to a tax-exclusive amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InclusiveAmounts {
    /// Rounded tax on the exclusive amount.
    pub tax: Money,
    /// Exclusive amount plus `tax`.
    pub including: Money,
}

/// Result of extracting tax from a tax-inclusive amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExclusiveAmounts {
    /// Rounded amount before tax.
    pub excluding: Money,
    /// Inclusive amount minus `excluding`.
    pub tax: Money,
}

// =============================================================================
// Round Trip
// =============================================================================

/// Outcome of converting an entered tax-inclusive amount to exclusive and
/// back again.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cashier enters tax-inclusive price: 366 (10%, FLOOR)                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  excluding = floor(366 / 1.10)        = 332                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  recalculated = 332 + floor(332 × 10%) = 365                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  discrepancy = 366 - 365 = 1  → show warning, keep the values          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoundTripCheck {
    /// The entered amount, as given.
    pub entered_including: Money,
    /// Exclusive amount derived from the entered amount.
    pub excluding: Money,
    /// `excluding` with tax added back.
    pub recalculated_including: Money,
    /// `entered_including - recalculated_including`.
    pub discrepancy: Money,
}

impl RoundTripCheck {
    /// True when the round trip did not reproduce the entered amount.
    #[inline]
    pub const fn has_discrepancy(&self) -> bool {
        !self.discrepancy.is_zero()
    }

    /// Advisory warning for the presentation layer, if any.
    pub fn warning(&self) -> Option<RoundingWarning> {
        self.has_discrepancy().then(|| RoundingWarning {
            entered: self.entered_including,
            recalculated: self.recalculated_including,
            discrepancy: self.discrepancy,
        })
    }
}

/// A non-blocking notice that successive rounding changed an entered amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoundingWarning {
    pub entered: Money,
    pub recalculated: Money,
    pub discrepancy: Money,
}

impl fmt::Display for RoundingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entered amount {} recalculates to {} after rounding (difference {})",
            self.entered.units(),
            self.recalculated.units(),
            self.discrepancy.units()
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
