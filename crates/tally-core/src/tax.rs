//! # Tax Module
//!
//! Tax-exclusive ⇄ tax-inclusive conversions under a [`RoundingPolicy`],
//! and the round-trip check that detects when they disagree.
//!
//! ## Conversions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  exclusive_to_inclusive                                                 │
//! │    tax       = round(excluding × rate / 100)                            │
//! │    including = excluding + tax                                          │
//! │                                                                         │
//! │  inclusive_to_exclusive                                                 │
//! │    excluding = round(including / (1 + rate / 100))                      │
//! │    tax       = including - excluding                                    │
//! │                                                                         │
//! │  Both are evaluated as exact integer ratios over basis points and      │
//! │  rounded once. They are NOT inverses of each other:                    │
//! │                                                                         │
//! │    366 ──to_exclusive──► 332 ──to_inclusive──► 365                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::rounding::RoundingPolicy;
//! use tally_core::tax::detect_round_trip_discrepancy;
//! use tally_core::types::TaxRate;
//!
//! let check = detect_round_trip_discrepancy(
//!     Money::from_units(366),
//!     TaxRate::from_percent(10),
//!     RoundingPolicy::Floor,
//! )
//! .unwrap();
//!
//! assert_eq!(check.excluding.units(), 332);
//! assert_eq!(check.recalculated_including.units(), 365);
//! assert_eq!(check.discrepancy.units(), 1);
//! ```
//!
//! The size of a discrepancy is not bounded here. Callers always recompute
//! and compare rather than assume ±1.

use crate::error::TaxResult;
use crate::money::Money;
use crate::rounding::RoundingPolicy;
use crate::types::{ExclusiveAmounts, InclusiveAmounts, RoundTripCheck, TaxRate};

const BPS_PER_UNIT: i128 = TaxRate::BPS_PER_UNIT as i128;

// =============================================================================
// Exclusive → Inclusive
// =============================================================================

/// Rounded tax due on a tax-exclusive amount.
///
/// A zero rate yields zero tax under every policy.
pub fn tax_on_exclusive(excluding: Money, rate: TaxRate, policy: RoundingPolicy) -> TaxResult<Money> {
    let numer = excluding.units() as i128 * rate.bps() as i128;
    Money::try_from_wide(policy.round_ratio(numer, BPS_PER_UNIT), "tax amount")
}

/// Adds tax to a tax-exclusive amount.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::rounding::RoundingPolicy;
/// use tally_core::tax::exclusive_to_inclusive;
/// use tally_core::types::TaxRate;
///
/// let r = exclusive_to_inclusive(Money::from_units(333), TaxRate::from_percent(10), RoundingPolicy::Floor)
///     .unwrap();
/// assert_eq!(r.tax.units(), 33);
/// assert_eq!(r.including.units(), 366);
/// ```
pub fn exclusive_to_inclusive(
    excluding: Money,
    rate: TaxRate,
    policy: RoundingPolicy,
) -> TaxResult<InclusiveAmounts> {
    let tax = tax_on_exclusive(excluding, rate, policy)?;
    let including = excluding.checked_add(tax)?;

    Ok(InclusiveAmounts { tax, including })
}

// =============================================================================
// Inclusive → Exclusive
// =============================================================================

/// Extracts tax from a tax-inclusive amount.
///
/// `excluding = round(including × 10000 / (10000 + bps))`; the divisor is
/// always positive because rates are unsigned.
pub fn inclusive_to_exclusive(
    including: Money,
    rate: TaxRate,
    policy: RoundingPolicy,
) -> TaxResult<ExclusiveAmounts> {
    let numer = including.units() as i128 * BPS_PER_UNIT;
    let denom = BPS_PER_UNIT + rate.bps() as i128;
    let excluding = Money::try_from_wide(policy.round_ratio(numer, denom), "exclusive amount")?;
    let tax = including.checked_sub(excluding)?;

    Ok(ExclusiveAmounts { excluding, tax })
}

// =============================================================================
// Round Trip
// =============================================================================

/// Converts an entered tax-inclusive amount to exclusive and back, and
/// reports how far the result drifted from what was entered.
///
/// A nonzero [`RoundTripCheck::discrepancy`] is advisory. The computed
/// amounts are still valid and returned.
pub fn detect_round_trip_discrepancy(
    entered_including: Money,
    rate: TaxRate,
    policy: RoundingPolicy,
) -> TaxResult<RoundTripCheck> {
    let ExclusiveAmounts { excluding, .. } = inclusive_to_exclusive(entered_including, rate, policy)?;
    let InclusiveAmounts { including, .. } = exclusive_to_inclusive(excluding, rate, policy)?;
    let discrepancy = entered_including.checked_sub(including)?;

    Ok(RoundTripCheck {
        entered_including,
        excluding,
        recalculated_including: including,
        discrepancy,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
