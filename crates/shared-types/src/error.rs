use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Shown for failures that carry no message the user can act on.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Categorization of errors raised while resetting a password.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppErrorKind {
    /// The backend refused the reset token/user id pair.
    TokenInvalid,
    /// Local input checks failed before any request was made.
    ValidationError,
    /// The backend refused the new password with a structured payload.
    SubmissionRejected,
    /// Network failure or a response without a structured payload.
    TransportError,
    /// The call did not settle within the configured timeout.
    Timeout,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::TokenInvalid => write!(f, "TokenInvalid"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::SubmissionRejected => write!(f, "SubmissionRejected"),
            AppErrorKind::TransportError => write!(f, "TransportError"),
            AppErrorKind::Timeout => write!(f, "Timeout"),
        }
    }
}

/// Structured error used across the client, its backend and the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    pub fn token_invalid(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::TokenInvalid,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn submission_rejected(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::SubmissionRejected,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::TransportError,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Timeout,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Whether the error came with a message meant for the user
    /// (a server payload or a local validation rule).
    pub fn is_structured(&self) -> bool {
        matches!(
            self.kind,
            AppErrorKind::TokenInvalid
                | AppErrorKind::ValidationError
                | AppErrorKind::SubmissionRejected
        )
    }

    /// Text to put in front of the user.
    ///
    /// Transport failures and timeouts carry diagnostic text only, so they
    /// fall back to [`GENERIC_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        if self.is_structured() {
            self.message.clone()
        } else {
            GENERIC_ERROR_MESSAGE.to_string()
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Validation failed", field_errors)
    }
}
