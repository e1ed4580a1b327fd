//! # tally-core: Pure Tax Logic for Tally
//!
//! This crate holds the tax rounding rules of a point-of-sale system as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (tally CLI, POS frontend)             │   │
//! │  │    reads amount/rate/policy ──► shows amounts + warnings        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────────────┐ │   │
//! │  │   │ rounding │  │   tax    │  │ session  │  │  validation    │ │   │
//! │  │   │  Policy  │─►│ in ⇄ ex  │  │  login   │─►│  blank checks  │ │   │
//! │  │   │          │  │ roundtrip│  │  logout  │  │  field rules   │ │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └────────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`rounding`] - FLOOR / HALF_UP / CEIL and lenient policy decoding
//! - [`tax`] - Exclusive ⇄ inclusive conversion and round-trip checks
//! - [`types`] - Tax rate and result records
//! - [`validation`] - Blank predicate and login field rules
//! - [`session`] - Caller-owned login state
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Amounts are whole units (i64); ratios are exact
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! All types are `Send + Sync` and every call is independent, so any number
//! of threads may call into the crate without coordination.
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{exclusive_to_inclusive, Money, RoundingPolicy, TaxRate};
//!
//! let r = exclusive_to_inclusive(
//!     Money::from_units(777),
//!     TaxRate::from_percent(8),
//!     RoundingPolicy::Floor,
//! )
//! .unwrap();
//!
//! // 777 × 8% = 62.16 → 62
//! assert_eq!(r.tax.units(), 62);
//! assert_eq!(r.including.units(), 839);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod rounding;
pub mod session;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, TaxError, TaxResult, ValidationError};
pub use money::Money;
pub use rounding::{apply_rounding, RoundingPolicy};
pub use tax::{detect_round_trip_discrepancy, exclusive_to_inclusive, inclusive_to_exclusive};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest accepted login id, in characters.
pub const MAX_LOGIN_ID_LENGTH: usize = 50;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest accepted password, in characters.
///
/// ## Business Reason
/// Bounds the work a password hasher does per login attempt.
pub const MAX_PASSWORD_LENGTH: usize = 128;
