use serde::{Deserialize, Serialize};

/// JSON body of `POST /reset-password`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResetPasswordBody {
    pub password: String,
}

impl std::fmt::Debug for ResetPasswordBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordBody")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `{success, error}` envelope the backend answers with.
///
/// Both fields are optional on the wire; a body is only a structured
/// failure when `success` is not `true` and `error` is a non-empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusPayload {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// Server message of a structured failure, if this is one.
    pub fn failure_message(&self) -> Option<&str> {
        if self.success {
            return None;
        }
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}
