//! # Session Module
//!
//! Login state as a plain value owned by the caller.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │              login(ok)                                                  │
//! │  LoggedOut ─────────────────────► LoggedIn { login_id, since }          │
//! │      ▲  │                             │  │                              │
//! │      │  │ login(bad) → Err            │  │ login(any) → AlreadyLoggedIn │
//! │      │  ▼                             │  ▼                              │
//! │      └───────────── logout ◄──────────┘                                 │
//! │                                                                         │
//! │  Transitions return a new state for the caller to keep. There is no    │
//! │  module-level session.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checking the password itself is the host's job; it plugs in through
//! [`CredentialVerifier`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_login_id, validate_password};

// =============================================================================
// Login State
// =============================================================================

/// Who, if anyone, is logged in at a register.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginState {
    #[default]
    LoggedOut,
    LoggedIn {
        login_id: String,
        since: DateTime<Utc>,
    },
}

impl LoginState {
    /// True when a user is logged in.
    pub fn is_logged_in(&self) -> bool {
        matches!(self, LoginState::LoggedIn { .. })
    }

    /// The logged-in user's id.
    pub fn login_id(&self) -> Option<&str> {
        match self {
            LoginState::LoggedIn { login_id, .. } => Some(login_id),
            LoginState::LoggedOut => None,
        }
    }
}

/// Raw login form input. Either field may be missing.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub login_id: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(login_id: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            login_id: Some(login_id.into()),
            password: Some(password.into()),
        }
    }
}

/// Checks a validated login id and password against the user store.
pub trait CredentialVerifier {
    fn verify(&self, login_id: &str, password: &str) -> bool;
}

impl<F> CredentialVerifier for F
where
    F: Fn(&str, &str) -> bool,
{
    fn verify(&self, login_id: &str, password: &str) -> bool {
        self(login_id, password)
    }
}

// =============================================================================
// Transitions
// =============================================================================

/// Attempts a login from `state`.
///
/// Fields are validated before the verifier is consulted, so a blank
/// password never reaches the user store. On any error the caller keeps
/// its current state.
pub fn login<V>(
    state: &LoginState,
    credentials: &Credentials,
    verifier: &V,
    now: DateTime<Utc>,
) -> CoreResult<LoginState>
where
    V: CredentialVerifier + ?Sized,
{
    if let LoginState::LoggedIn { login_id, .. } = state {
        return Err(CoreError::AlreadyLoggedIn {
            login_id: login_id.clone(),
        });
    }

    let login_id = validate_login_id(credentials.login_id.as_deref())?;
    let password = validate_password(credentials.password.as_deref())?;

    if !verifier.verify(login_id, password) {
        return Err(CoreError::InvalidCredentials);
    }

    Ok(LoginState::LoggedIn {
        login_id: login_id.to_string(),
        since: now,
    })
}

/// Logs out. The result does not depend on the current state, so logging
/// out while logged out is a no-op.
pub fn logout() -> LoginState {
    LoginState::LoggedOut
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()
    }

    fn accept_one(login_id: &str, password: &str) -> bool {
        login_id == "cashier-1" && password == "open-sesame"
    }

    #[test]
    fn test_login_success() {
        let state = LoginState::default();
        let creds = Credentials::new(" cashier-1 ", "open-sesame");

        let next = login(&state, &creds, &accept_one, now()).unwrap();
        assert!(next.is_logged_in());
        assert_eq!(next.login_id(), Some("cashier-1"));
        assert_eq!(
            next,
            LoginState::LoggedIn {
                login_id: "cashier-1".to_string(),
                since: now(),
            }
        );
        // input untouched
        assert_eq!(state, LoginState::LoggedOut);
    }

    #[test]
    fn test_login_rejected() {
        let creds = Credentials::new("cashier-1", "wrong-password");
        let err = login(&LoginState::LoggedOut, &creds, &accept_one, now()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCredentials));
    }

    #[test]
    fn test_blank_fields_never_reach_verifier() {
        let panicking = |_: &str, _: &str| -> bool { panic!("verifier called") };

        let creds = Credentials {
            login_id: Some("cashier-1".to_string()),
            password: None,
        };
        let err = login(&LoginState::LoggedOut, &creds, &panicking, now()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));

        let creds = Credentials {
            login_id: Some("   ".to_string()),
            password: Some("open-sesame".to_string()),
        };
        let err = login(&LoginState::LoggedOut, &creds, &panicking, now()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_login_while_logged_in() {
        let state = LoginState::LoggedIn {
            login_id: "cashier-1".to_string(),
            since: now(),
        };
        let creds = Credentials::new("cashier-2", "open-sesame");
        let err = login(&state, &creds, &|_: &str, _: &str| true, now()).unwrap_err();
        assert!(matches!(err, CoreError::AlreadyLoggedIn { ref login_id } if login_id == "cashier-1"));
    }

    #[test]
    fn test_logout() {
        let state = LoginState::LoggedIn {
            login_id: "cashier-1".to_string(),
            since: now(),
        };
        assert!(state.is_logged_in());

        let state = logout();
        assert_eq!(state, LoginState::LoggedOut);
        assert_eq!(logout(), state);
    }

    #[test]
    fn test_full_cycle() {
        let state = LoginState::default();
        let state = login(&state, &Credentials::new("cashier-1", "open-sesame"), &accept_one, now()).unwrap();
        assert!(state.is_logged_in());
        let state = logout();
        let state = login(&state, &Credentials::new("cashier-1", "open-sesame"), &accept_one, now()).unwrap();
        assert!(state.is_logged_in());
    }

    #[test]
    fn test_state_serializes_with_status_tag() {
        let json = serde_json::to_value(LoginState::LoggedOut).unwrap();
        assert_eq!(json["status"], "logged_out");

        let credentials: Credentials =
            serde_json::from_str(r#"{"loginId": "cashier-1", "password": null}"#).unwrap();
        assert_eq!(credentials.login_id.as_deref(), Some("cashier-1"));
        assert!(credentials.password.is_none());
    }

    #[test]
    fn test_typescript_bindings() {
        let state = LoginState::decl();
        assert!(state.contains("logged_in"));
        assert!(state.contains("since: string"));

        let credentials = Credentials::decl();
        assert!(credentials.contains("loginId: string | null"));
    }
}
