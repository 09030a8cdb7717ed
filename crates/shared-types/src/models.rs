use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 20;

pub const PASSWORD_LENGTH_MESSAGE: &str = "Password must be 8 to 20 characters long!";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Password does not match!";

const PASSWORD_LENGTH_CODE: &str = "password_length";

// ---------------------------------------------------------------------------
// Reset request
// ---------------------------------------------------------------------------

/// Token/user-id pair taken from the reset link's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRequest {
    pub token: String,
    pub id: String,
}

impl ResetRequest {
    pub fn new(token: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            id: id.into(),
        }
    }

    /// Build from optional query parameters. Missing values are sent as empty
    /// strings and left for the backend to reject.
    pub fn from_query(token: Option<String>, id: Option<String>) -> Self {
        Self {
            token: token.unwrap_or_default(),
            id: id.unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Credential input
// ---------------------------------------------------------------------------

/// The two inputs of the reset form, addressed by their HTML `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Password,
    ConfirmPassword,
}

impl CredentialField {
    pub fn name(&self) -> &'static str {
        match self {
            CredentialField::Password => "password",
            CredentialField::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "password" => Some(CredentialField::Password),
            "confirmPassword" => Some(CredentialField::ConfirmPassword),
            _ => None,
        }
    }
}

/// New password and its confirmation as typed by the user.
#[derive(Clone, Default, PartialEq, Eq, Validate)]
pub struct CredentialInput {
    #[validate(
        custom(function = "validate_trimmed_length"),
        must_match(other = "confirm_password", message = "Password does not match!")
    )]
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for CredentialInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialInput")
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

impl CredentialInput {
    pub fn new(password: impl Into<String>, confirm_password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn set(&mut self, field: CredentialField, value: String) {
        match field {
            CredentialField::Password => self.password = value,
            CredentialField::ConfirmPassword => self.confirm_password = value,
        }
    }

    /// Run the password rules. The length rule is reported before the
    /// confirmation rule when both fail.
    pub fn check(&self) -> Result<(), AppError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let length_failed = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .any(|e| e.code == PASSWORD_LENGTH_CODE);
        let message = if length_failed {
            PASSWORD_LENGTH_MESSAGE
        } else {
            PASSWORD_MISMATCH_MESSAGE
        };

        let mut err = AppError::from(errors);
        err.message = message.to_string();
        Err(err)
    }
}

/// Trimmed length must fall within the allowed range, counted in characters.
fn validate_trimmed_length(password: &str) -> Result<(), ValidationError> {
    let len = password.trim().chars().count();
    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new(PASSWORD_LENGTH_CODE)
            .with_message(Cow::Borrowed(PASSWORD_LENGTH_MESSAGE)))
    }
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// What the reset page is currently showing. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Waiting on the token verification call.
    Verifying,
    /// The backend rejected the token; carries its message.
    InvalidToken(String),
    /// Verification could not complete (network, malformed reply, timeout).
    Unavailable(String),
    /// The password form, optionally with an inline error.
    FormActive { error: Option<String> },
    Success,
}

impl ViewState {
    /// No transition leaves a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ViewState::InvalidToken(_) | ViewState::Unavailable(_) | ViewState::Success
        )
    }
}
