//! # Rounding Module
//!
//! Rounding policies that resolve a fractional intermediate result to a
//! whole currency unit.
//!
//! ## Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  value      FLOOR     HALF_UP    CEIL                                   │
//! │  ───────    ─────     ───────    ────                                   │
//! │   100.1      100        100       101                                   │
//! │   100.5      100        101       101                                   │
//! │    99.5       99        100       100                                   │
//! │  -100.5     -101       -100      -100                                   │
//! │                                                                         │
//! │  HALF_UP sends ties toward +∞. This is NOT Bankers Rounding:           │
//! │  2.5 → 3 and -2.5 → -2.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Decoding
//! Policies arrive from settings screens and config files as numeric codes
//! or names. Anything unrecognised decodes to [`RoundingPolicy::Floor`]:
//!
//! ```rust
//! use tally_core::rounding::RoundingPolicy;
//!
//! assert_eq!(RoundingPolicy::from_code(1), RoundingPolicy::HalfUp);
//! assert_eq!(RoundingPolicy::from_code(999), RoundingPolicy::Floor);
//! assert_eq!(RoundingPolicy::from(None), RoundingPolicy::Floor);
//! assert_eq!(RoundingPolicy::from("ceiling"), RoundingPolicy::Ceil);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{TaxError, TaxResult};

// =============================================================================
// Rounding Policy
// =============================================================================

/// How a fractional amount is resolved to a whole currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingPolicy {
    /// Largest integer ≤ value. Also the fallback for unknown policies.
    #[default]
    Floor,
    /// Nearest integer, ties toward positive infinity.
    HalfUp,
    /// Smallest integer ≥ value.
    Ceil,
}

impl RoundingPolicy {
    /// Numeric code of FLOOR.
    pub const FLOOR_CODE: i64 = 0;
    /// Numeric code of HALF_UP.
    pub const HALF_UP_CODE: i64 = 1;
    /// Numeric code of CEIL.
    pub const CEIL_CODE: i64 = 2;

    /// Decodes a numeric policy code. Codes outside `0..=2` mean FLOOR.
    pub const fn from_code(code: i64) -> Self {
        match code {
            Self::HALF_UP_CODE => RoundingPolicy::HalfUp,
            Self::CEIL_CODE => RoundingPolicy::Ceil,
            _ => RoundingPolicy::Floor,
        }
    }

    /// Returns the numeric code of this policy.
    pub const fn code(&self) -> i64 {
        match self {
            RoundingPolicy::Floor => Self::FLOOR_CODE,
            RoundingPolicy::HalfUp => Self::HALF_UP_CODE,
            RoundingPolicy::Ceil => Self::CEIL_CODE,
        }
    }

    /// Rounds a real value to an integer under this policy.
    ///
    /// NaN and infinities are rejected with [`TaxError::NonFinite`]; results
    /// outside the `i64` range with [`TaxError::Overflow`].
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::rounding::RoundingPolicy;
    ///
    /// assert_eq!(RoundingPolicy::Floor.round(-100.5).unwrap(), -101);
    /// assert_eq!(RoundingPolicy::HalfUp.round(-100.5).unwrap(), -100);
    /// assert_eq!(RoundingPolicy::Ceil.round(100.1).unwrap(), 101);
    /// assert!(RoundingPolicy::Floor.round(f64::NAN).is_err());
    /// ```
    pub fn round(&self, value: f64) -> TaxResult<i64> {
        if !value.is_finite() {
            return Err(TaxError::NonFinite);
        }

        let rounded = match self {
            RoundingPolicy::Floor => value.floor(),
            RoundingPolicy::HalfUp => {
                // value - floor(value) is exact, so the tie test is too.
                // (value + 0.5).floor() is not: 0.49999999999999994 + 0.5 == 1.0
                let floor = value.floor();
                if value - floor >= 0.5 {
                    floor + 1.0
                } else {
                    floor
                }
            }
            RoundingPolicy::Ceil => value.ceil(),
        };

        // i64 covers [-2^63, 2^63); both bounds are exact in f64.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        if !(-LIMIT..LIMIT).contains(&rounded) {
            return Err(TaxError::Overflow {
                operation: "rounding",
            });
        }

        Ok(rounded as i64)
    }

    /// Rounds the exact ratio `numer / denom` under this policy.
    ///
    /// `denom` must be positive. Tax arithmetic goes through here so that
    /// e.g. `330 / 1.10` is exactly 300 rather than `299.99999999999994`.
    pub(crate) fn round_ratio(&self, numer: i128, denom: i128) -> i128 {
        debug_assert!(denom > 0, "ratio denominator must be positive");

        match self {
            RoundingPolicy::Floor => numer.div_euclid(denom),
            // floor(n/d + 1/2) == floor((2n + d) / 2d)
            RoundingPolicy::HalfUp => (2 * numer + denom).div_euclid(2 * denom),
            RoundingPolicy::Ceil => -(-numer).div_euclid(denom),
        }
    }
}

/// Rounds `value` to an integer under `policy`.
///
/// Free-function form of [`RoundingPolicy::round`].
pub fn apply_rounding(value: f64, policy: RoundingPolicy) -> TaxResult<i64> {
    policy.round(value)
}

// =============================================================================
// Conversions
// =============================================================================

/// Absent policy means FLOOR.
impl From<Option<i64>> for RoundingPolicy {
    fn from(code: Option<i64>) -> Self {
        code.map(RoundingPolicy::from_code).unwrap_or_default()
    }
}

impl From<i64> for RoundingPolicy {
    fn from(code: i64) -> Self {
        RoundingPolicy::from_code(code)
    }
}

/// Accepts names (any case, `-` or `_`) and numeric codes.
impl From<&str> for RoundingPolicy {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return RoundingPolicy::from_code(code);
        }

        match s.to_lowercase().replace('-', "_").as_str() {
            "half_up" | "round" | "halfup" => RoundingPolicy::HalfUp,
            "ceil" | "ceiling" => RoundingPolicy::Ceil,
            _ => RoundingPolicy::Floor,
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::Floor => write!(f, "FLOOR"),
            RoundingPolicy::HalfUp => write!(f, "HALF_UP"),
            RoundingPolicy::Ceil => write!(f, "CEIL"),
        }
    }
}

/// Wire shapes a policy may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPolicy {
    Code(i64),
    Name(String),
    Other(serde::de::IgnoredAny),
}

/// Deserialization never fails on the value itself: unknown codes, names,
/// `null` and other JSON types all become FLOOR.
impl<'de> Deserialize<'de> for RoundingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawPolicy>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawPolicy::Code(code)) => RoundingPolicy::from_code(code),
            Some(RawPolicy::Name(name)) => RoundingPolicy::from(name.as_str()),
            Some(RawPolicy::Other(_)) | None => RoundingPolicy::Floor,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor() {
        let p = RoundingPolicy::Floor;
        assert_eq!(p.round(100.5).unwrap(), 100);
        assert_eq!(p.round(100.9).unwrap(), 100);
        assert_eq!(p.round(-100.5).unwrap(), -101);
        assert_eq!(p.round(0.0).unwrap(), 0);
    }

    #[test]
    fn test_half_up() {
        let p = RoundingPolicy::HalfUp;
        assert_eq!(p.round(100.5).unwrap(), 101);
        assert_eq!(p.round(-100.5).unwrap(), -100);
        assert_eq!(p.round(99.5).unwrap(), 100);
        assert_eq!(p.round(100.4).unwrap(), 100);
        assert_eq!(p.round(-100.6).unwrap(), -101);
        // Not Bankers Rounding
        assert_eq!(p.round(2.5).unwrap(), 3);
    }

    #[test]
    fn test_half_up_just_below_tie() {
        assert_eq!(RoundingPolicy::HalfUp.round(0.49999999999999994).unwrap(), 0);
    }

    #[test]
    fn test_ceil() {
        let p = RoundingPolicy::Ceil;
        assert_eq!(p.round(100.1).unwrap(), 101);
        assert_eq!(p.round(100.0).unwrap(), 100);
        assert_eq!(p.round(-100.5).unwrap(), -100);
    }

    #[test]
    fn test_unknown_codes_fall_back_to_floor() {
        let floor = RoundingPolicy::Floor.round(100.5).unwrap();
        assert_eq!(floor, 100);

        for code in [-1, 3, 999] {
            let policy = RoundingPolicy::from_code(code);
            assert_eq!(policy, RoundingPolicy::Floor);
            assert_eq!(policy.round(100.5).unwrap(), floor);
        }
        assert_eq!(RoundingPolicy::from(None).round(100.5).unwrap(), floor);
    }

    #[test]
    fn test_code_roundtrip() {
        for policy in [RoundingPolicy::Floor, RoundingPolicy::HalfUp, RoundingPolicy::Ceil] {
            assert_eq!(RoundingPolicy::from_code(policy.code()), policy);
        }
    }

    #[test]
    fn test_from_str_names() {
        assert_eq!(RoundingPolicy::from("HALF_UP"), RoundingPolicy::HalfUp);
        assert_eq!(RoundingPolicy::from("half-up"), RoundingPolicy::HalfUp);
        assert_eq!(RoundingPolicy::from("Ceil"), RoundingPolicy::Ceil);
        assert_eq!(RoundingPolicy::from("2"), RoundingPolicy::Ceil);
        assert_eq!(RoundingPolicy::from("bankers"), RoundingPolicy::Floor);
        assert_eq!(RoundingPolicy::from(""), RoundingPolicy::Floor);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(apply_rounding(f64::NAN, RoundingPolicy::Floor), Err(TaxError::NonFinite));
        assert_eq!(apply_rounding(f64::INFINITY, RoundingPolicy::Ceil), Err(TaxError::NonFinite));
        assert_eq!(
            apply_rounding(f64::NEG_INFINITY, RoundingPolicy::HalfUp),
            Err(TaxError::NonFinite)
        );
    }

    #[test]
    fn test_out_of_range_values_overflow() {
        let overflow = Err(TaxError::Overflow {
            operation: "rounding",
        });
        assert_eq!(RoundingPolicy::Floor.round(1e300), overflow);
        assert_eq!(RoundingPolicy::Ceil.round(-1e300), overflow);
        assert_eq!(RoundingPolicy::Floor.round(9_223_372_036_854_775_808.0), overflow);

        assert_eq!(RoundingPolicy::Floor.round(-9_223_372_036_854_775_808.0).unwrap(), i64::MIN);
        assert_eq!(RoundingPolicy::Floor.round(1e15 + 0.5).unwrap(), 1_000_000_000_000_000);
    }

    #[test]
    fn test_round_ratio() {
        // 201 / 2 = 100.5
        assert_eq!(RoundingPolicy::Floor.round_ratio(201, 2), 100);
        assert_eq!(RoundingPolicy::HalfUp.round_ratio(201, 2), 101);
        assert_eq!(RoundingPolicy::Ceil.round_ratio(201, 2), 101);

        // -201 / 2 = -100.5
        assert_eq!(RoundingPolicy::Floor.round_ratio(-201, 2), -101);
        assert_eq!(RoundingPolicy::HalfUp.round_ratio(-201, 2), -100);
        assert_eq!(RoundingPolicy::Ceil.round_ratio(-201, 2), -100);

        // exact
        assert_eq!(RoundingPolicy::Ceil.round_ratio(3_300_000, 11_000), 300);
    }

    #[test]
    fn test_serde_lenient() {
        let p: RoundingPolicy = serde_json::from_str("\"HALF_UP\"").unwrap();
        assert_eq!(p, RoundingPolicy::HalfUp);
        let p: RoundingPolicy = serde_json::from_str("2").unwrap();
        assert_eq!(p, RoundingPolicy::Ceil);

        for raw in ["-1", "3", "999", "null", "true", "\"nope\"", "1.5"] {
            let p: RoundingPolicy = serde_json::from_str(raw).unwrap();
            assert_eq!(p, RoundingPolicy::Floor, "input {raw}");
        }

        assert_eq!(serde_json::to_string(&RoundingPolicy::HalfUp).unwrap(), "\"HALF_UP\"");
    }
}
