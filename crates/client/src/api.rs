use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{select, Either};
use reqwest::StatusCode;
use shared_types::{ApiConfig, AppError, ResetPasswordBody, ResetRequest, StatusPayload};

use crate::flow::SubmitTicket;
use crate::platform;

/// Header telling the backend which client build is calling.
pub const PLATFORM_HEADER: &str = "x-client-platform";

/// The two backend calls. Decides how a structured failure is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    VerifyToken,
    ResetPassword,
}

impl Call {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Call::VerifyToken => "verify-token",
            Call::ResetPassword => "reset-password",
        }
    }

    fn rejection(&self, message: &str) -> AppError {
        match self {
            Call::VerifyToken => AppError::token_invalid(message),
            Call::ResetPassword => AppError::submission_rejected(message),
        }
    }
}

// ── Trait ────────────────────────────────────────────────────────────

/// Backend operations the reset page depends on.
#[allow(async_fn_in_trait)]
pub trait ResetBackend {
    /// Check that the token/id pair may reset a password.
    async fn verify_token(&self, request: &ResetRequest) -> Result<(), AppError>;

    /// Store the new password for the user the token belongs to.
    async fn reset_password(&self, request: &ResetRequest, password: &str)
        -> Result<(), AppError>;
}

// ── HTTP implementation ─────────────────────────────────────────────

/// `ResetBackend` over the backend's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api: ApiConfig,
    platform: &'static str,
}

impl HttpBackend {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api,
            platform: "unknown",
        }
    }

    /// Value sent in the `x-client-platform` header.
    pub fn with_platform(mut self, platform: &'static str) -> Self {
        self.platform = platform;
        self
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    fn request(&self, method: reqwest::Method, call: Call, request: &ResetRequest) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.api.endpoint(call.endpoint()))
            .query(&[("token", request.token.as_str()), ("id", request.id.as_str())])
            .header(PLATFORM_HEADER, self.platform)
    }

    async fn read_reply(call: Call, response: reqwest::Response) -> Result<(), AppError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::transport(format!("failed to read {} response: {}", call.endpoint(), e))
        })?;
        classify_response(call, status, &body)
    }
}

impl ResetBackend for HttpBackend {
    #[tracing::instrument(skip(self, request), fields(id = %request.id))]
    async fn verify_token(&self, request: &ResetRequest) -> Result<(), AppError> {
        let response = self
            .request(reqwest::Method::GET, Call::VerifyToken, request)
            .send()
            .await
            .map_err(|e| AppError::transport(format!("verify-token request failed: {}", e)))?;
        Self::read_reply(Call::VerifyToken, response).await
    }

    #[tracing::instrument(skip(self, request, password), fields(id = %request.id))]
    async fn reset_password(
        &self,
        request: &ResetRequest,
        password: &str,
    ) -> Result<(), AppError> {
        let body = ResetPasswordBody {
            password: password.to_string(),
        };
        let response = self
            .request(reqwest::Method::POST, Call::ResetPassword, request)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::transport(format!("reset-password request failed: {}", e)))?;
        Self::read_reply(Call::ResetPassword, response).await
    }
}

/// Map an HTTP reply onto the error taxonomy.
///
/// Verification accepts any 2xx body. A reset needs `{success: true}`.
/// A `{success: false, error}` body is a rejection whatever the status;
/// everything else is a transport error.
pub fn classify_response(call: Call, status: StatusCode, body: &str) -> Result<(), AppError> {
    let payload = serde_json::from_str::<StatusPayload>(body).ok();

    if status.is_success() {
        match call {
            Call::VerifyToken => return Ok(()),
            Call::ResetPassword if payload.as_ref().is_some_and(|p| p.success) => return Ok(()),
            Call::ResetPassword => {}
        }
    }

    match payload.as_ref().and_then(StatusPayload::failure_message) {
        Some(message) => Err(call.rejection(message)),
        None => Err(AppError::transport(format!(
            "{} answered {} without a structured payload",
            call.endpoint(),
            status
        ))),
    }
}

/// Race `fut` against a timer; losing the race is a `Timeout` error.
pub async fn with_timeout<T, F>(call: Call, limit: Duration, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    let fut = pin!(fut);
    let timer = pin!(platform::sleep(limit));
    match select(fut, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(AppError::timeout(format!(
            "{} did not answer within {:?}",
            call.endpoint(),
            limit
        ))),
    }
}

// --- Entry points used by the page ---

/// Verify the reset link, giving up after `limit`.
pub async fn verify_token<B: ResetBackend>(
    backend: &B,
    request: &ResetRequest,
    limit: Duration,
) -> Result<(), AppError> {
    tracing::info!(id = %request.id, "Verifying reset token");
    with_timeout(Call::VerifyToken, limit, backend.verify_token(request)).await
}

/// Submit the password carried by `ticket`, giving up after `limit`.
pub async fn reset_password<B: ResetBackend>(
    backend: &B,
    request: &ResetRequest,
    ticket: &SubmitTicket,
    limit: Duration,
) -> Result<(), AppError> {
    tracing::info!(id = %request.id, "Submitting new password");
    with_timeout(
        Call::ResetPassword,
        limit,
        backend.reset_password(request, ticket.password()),
    )
    .await
}
