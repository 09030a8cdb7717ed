use crate::common::*;
use axum::http::StatusCode;
use client::api::HttpBackend;
use client::flow::{ResetFlow, VERIFY_UNAVAILABLE_MESSAGE};
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, ResetRequest, ViewState};

#[tokio::test]
async fn valid_token_shows_form() {
    let mock = MockBackend::start(Reply::ok(), Reply::ok()).await;
    let flow = verified_flow(&mock.backend()).await;

    assert_eq!(flow.view(), &ViewState::FormActive { error: None });
    assert_eq!(mock.verify_hits(), 1);
    assert_eq!(mock.reset_hits(), 0);
}

#[tokio::test]
async fn verify_sends_token_id_and_platform() {
    let mock = MockBackend::start(Reply::ok(), Reply::ok()).await;
    verified_flow(&mock.backend()).await;

    let seen = mock.last_verify().expect("verify-token was not called");
    assert_eq!(seen.query.get("token").map(String::as_str), Some(TOKEN));
    assert_eq!(seen.query.get("id").map(String::as_str), Some(USER_ID));
    assert_eq!(seen.platform.as_deref(), Some("web"));
}

#[tokio::test]
async fn any_success_body_counts_as_verified() {
    let mock = MockBackend::start(Reply::Text(StatusCode::OK, "ok"), Reply::ok()).await;
    let flow = verified_flow(&mock.backend()).await;
    assert_eq!(flow.view(), &ViewState::FormActive { error: None });
}

#[tokio::test]
async fn rejected_token_shows_server_message() {
    let mock = MockBackend::start(
        Reply::failure(StatusCode::BAD_REQUEST, "Reset token expired!"),
        Reply::ok(),
    )
    .await;
    let mut flow = verified_flow(&mock.backend()).await;

    assert_eq!(
        flow.view(),
        &ViewState::InvalidToken("Reset token expired!".into())
    );

    // No form, so nothing can be submitted.
    fill(&mut flow, "longenoughpass", "longenoughpass");
    assert_eq!(submit(&mut flow, &mock.backend()).await, None);
    assert_eq!(mock.reset_hits(), 0);
}

#[tokio::test]
async fn missing_query_values_are_sent_empty() {
    let mock = MockBackend::start(
        Reply::failure(StatusCode::BAD_REQUEST, "Invalid request!"),
        Reply::ok(),
    )
    .await;
    let backend = mock.backend();
    let mut flow = ResetFlow::new(ResetRequest::from_query(None, None));
    let outcome = client::api::verify_token(&backend, flow.request(), LIMIT).await;
    flow.finish_verify(outcome);

    let seen = mock.last_verify().expect("verify-token was not called");
    assert_eq!(seen.query.get("token").map(String::as_str), Some(""));
    assert_eq!(seen.query.get("id").map(String::as_str), Some(""));
    assert_eq!(flow.view(), &ViewState::InvalidToken("Invalid request!".into()));
}

#[tokio::test]
async fn unstructured_error_shows_fallback() {
    let mock = MockBackend::start(
        Reply::Text(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
        Reply::ok(),
    )
    .await;
    let flow = verified_flow(&mock.backend()).await;

    assert_eq!(
        flow.view(),
        &ViewState::Unavailable(VERIFY_UNAVAILABLE_MESSAGE.into())
    );
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let backend = HttpBackend::new(closed_api().await);
    let err = client::api::verify_token(&backend, &reset_request(), LIMIT)
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::TransportError);

    let mut flow = ResetFlow::new(reset_request());
    flow.finish_verify(Err(err));
    assert!(flow.view().is_terminal());
}

#[tokio::test]
async fn zero_timeout_in_config_file_still_reaches_backend() {
    let mock = MockBackend::start(Reply::ok(), Reply::ok()).await;
    let mut api = client::config::parse_config("[api]\ntimeout_secs = 0").api;
    api.base_url = mock.api().base_url;
    let backend = HttpBackend::new(api);

    let mut flow = ResetFlow::new(reset_request());
    let outcome =
        client::api::verify_token(&backend, flow.request(), backend.api().request_timeout()).await;
    flow.finish_verify(outcome);

    assert_eq!(flow.view(), &ViewState::FormActive { error: None });
    assert_eq!(mock.verify_hits(), 1);
}
