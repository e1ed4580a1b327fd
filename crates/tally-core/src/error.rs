//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── TaxError         - Numeric edge cases in tax arithmetic           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tally-cli errors (binary)                                             │
//! │  └── ConfigError      - Bad environment configuration                  │
//! │                                                                         │
//! │  Flow: ValidationError / TaxError → CoreError → anyhow → stderr        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - An unknown rounding policy (normalised to FLOOR)
//! - A round-trip rounding discrepancy (advisory warning only)

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Login attempted while a user is already logged in.
    ///
    /// ## User Workflow
    /// ```text
    /// LoggedIn { login_id: "cashier-1" }
    ///      │
    ///      ▼
    /// login("cashier-2", ...)
    ///      │
    ///      ▼
    /// AlreadyLoggedIn { login_id: "cashier-1" }
    ///      │
    ///      ▼
    /// UI shows: "cashier-1 must log out first"
    /// ```
    #[error("{login_id} is already logged in")]
    AlreadyLoggedIn { login_id: String },

    /// The credential verifier rejected the login id/password pair.
    #[error("Invalid login id or password")]
    InvalidCredentials,

    /// Tax arithmetic error (wraps TaxError).
    #[error("Tax calculation error: {0}")]
    Tax(#[from] TaxError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Tax Error
// =============================================================================

/// Numeric failures in tax and rounding arithmetic.
///
/// Only reachable for inputs outside the monetary domain: NaN/infinite
/// reals, or amounts and rates so large the result leaves `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TaxError {
    /// Value passed to rounding was NaN or infinite.
    #[error("cannot round a non-finite value")]
    NonFinite,

    /// Result does not fit in the amount type.
    #[error("{operation} overflowed the amount range")]
    Overflow { operation: &'static str },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, empty, or whitespace only.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., disallowed characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with TaxError.
pub type TaxResult<T> = Result<T, TaxError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AlreadyLoggedIn {
            login_id: "cashier-1".to_string(),
        };
        assert_eq!(err.to_string(), "cashier-1 is already logged in");

        let err = TaxError::Overflow {
            operation: "tax amount",
        };
        assert_eq!(err.to_string(), "tax amount overflowed the amount range");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "password".to_string(),
        };
        assert_eq!(err.to_string(), "password is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        };
        assert_eq!(err.to_string(), "password must be at least 8 characters");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "login id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = TaxError::NonFinite.into();
        assert!(matches!(core_err, CoreError::Tax(TaxError::NonFinite)));
    }
}
