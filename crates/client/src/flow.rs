//! State controller behind the reset page.
//!
//! The controller is synchronous: the page calls `begin_submit`, awaits the
//! backend itself, then hands the outcome to `finish_submit`. That keeps the
//! controller inside a single `Signal` without holding a borrow across an
//! `.await`.

use std::fmt;

use shared_types::{AppError, AppErrorKind, CredentialField, CredentialInput, ResetRequest, ViewState};

/// Shown when verification cannot complete for reasons other than a
/// rejected token.
pub const VERIFY_UNAVAILABLE_MESSAGE: &str =
    "Unable to verify reset token. Please reload the page to try again.";

/// Password accepted by local validation and cleared for submission.
#[derive(Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    password: String,
}

impl SubmitTicket {
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for SubmitTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitTicket")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What the page must do after a submission settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    /// Replace the current history entry with the bare reset path.
    ReplaceHistory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResetFlow {
    request: ResetRequest,
    view: ViewState,
    input: CredentialInput,
    in_flight: bool,
}

impl ResetFlow {
    pub fn new(request: ResetRequest) -> Self {
        Self {
            request,
            view: ViewState::Verifying,
            input: CredentialInput::default(),
            in_flight: false,
        }
    }

    pub fn request(&self) -> &ResetRequest {
        &self.request
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn input(&self) -> &CredentialInput {
        &self.input
    }

    /// A reset call is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Apply the verification outcome. Only the first outcome counts.
    pub fn finish_verify(&mut self, outcome: Result<(), AppError>) {
        if self.view != ViewState::Verifying {
            tracing::debug!(view = ?self.view, "Ignoring late verification outcome");
            return;
        }

        self.view = match outcome {
            Ok(()) => {
                tracing::info!(id = %self.request.id, "Reset token verified");
                ViewState::FormActive { error: None }
            }
            Err(err) if err.kind == AppErrorKind::TokenInvalid => {
                tracing::info!(id = %self.request.id, reason = %err.message, "Reset token rejected");
                ViewState::InvalidToken(err.message)
            }
            Err(err) => {
                tracing::error!(id = %self.request.id, error = %err, "Reset token verification failed");
                ViewState::Unavailable(VERIFY_UNAVAILABLE_MESSAGE.to_string())
            }
        };
    }

    pub fn set_field(&mut self, field: CredentialField, value: String) {
        self.input.set(field, value);
    }

    /// Validate the form and mark a submission as in flight.
    ///
    /// Returns `None` when nothing should be sent: the form is not showing,
    /// a submission is already running, or validation failed (the error is
    /// then displayed).
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !matches!(self.view, ViewState::FormActive { .. }) {
            return None;
        }
        if self.in_flight {
            tracing::debug!("Submission already in flight, ignoring submit");
            return None;
        }

        if let Err(err) = self.input.check() {
            self.view = ViewState::FormActive {
                error: Some(err.user_message()),
            };
            return None;
        }

        self.in_flight = true;
        self.view = ViewState::FormActive { error: None };
        Some(SubmitTicket {
            password: self.input.password.clone(),
        })
    }

    /// Apply the reset outcome and clear the busy flag.
    pub fn finish_submit(&mut self, outcome: Result<(), AppError>) -> Navigation {
        if !self.in_flight {
            return Navigation::Stay;
        }
        self.in_flight = false;

        match outcome {
            Ok(()) => {
                tracing::info!(id = %self.request.id, "Password reset");
                self.view = ViewState::Success;
                Navigation::ReplaceHistory
            }
            Err(err) => {
                if err.is_structured() {
                    tracing::info!(id = %self.request.id, reason = %err.message, "Password reset rejected");
                } else {
                    tracing::warn!(id = %self.request.id, error = %err, "Password reset failed");
                }
                self.view = ViewState::FormActive {
                    error: Some(err.user_message()),
                };
                Navigation::Stay
            }
        }
    }
}
