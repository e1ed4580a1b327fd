//! # Validation Module
//!
//! Input validation for login fields and tax settings.
//!
//! ## Optional Strings
//! Form fields arrive as `Option<&str>`: `None` when the field was never
//! sent, `Some("")` or `Some("   ")` when it was left empty. All three are
//! *blank*, decided by one explicit predicate instead of truthiness:
//!
//! ```rust
//! use tally_core::validation::is_blank;
//!
//! assert!(is_blank(None));
//! assert!(is_blank(Some("")));
//! assert!(is_blank(Some("  \t")));
//! assert!(!is_blank(Some("cashier")));
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_login_id, validate_password};
//!
//! assert!(validate_login_id(Some("cashier-1")).is_ok());
//! assert!(validate_password(Some("correct horse")).is_ok());
//! assert!(validate_password(None).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_LOGIN_ID_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// True for an absent, empty, or whitespace-only value.
#[inline]
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

/// Validates a login id.
///
/// ## Rules
/// - Must not be blank
/// - At most 50 characters after trimming
/// - Letters, digits, `-`, `_`, `.` and `@` only
///
/// ## Returns
/// The trimmed login id.
pub fn validate_login_id(login_id: Option<&str>) -> ValidationResult<&str> {
    let login_id = match login_id.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => {
            return Err(ValidationError::Required {
                field: "login id".to_string(),
            })
        }
    };

    if login_id.chars().count() > MAX_LOGIN_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "login id".to_string(),
            max: MAX_LOGIN_ID_LENGTH,
        });
    }

    if !login_id
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "login id".to_string(),
            reason: "must contain only letters, numbers, '-', '_', '.' and '@'".to_string(),
        });
    }

    Ok(login_id)
}

/// Validates a password.
///
/// ## Rules
/// - Must not be blank
/// - Between 8 and 128 characters
/// - No leading or trailing whitespace (passwords are never trimmed)
pub fn validate_password(password: Option<&str>) -> ValidationResult<&str> {
    let password = match password {
        Some(p) if !is_blank(Some(p)) => p,
        _ => {
            return Err(ValidationError::Required {
                field: "password".to_string(),
            })
        }
    };

    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LENGTH,
        });
    }

    if password.trim() != password {
        return Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: "must not start or end with whitespace".to_string(),
        });
    }

    Ok(password)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
