use crate::common::*;
use axum::http::StatusCode;
use client::flow::Navigation;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    ViewState, GENERIC_ERROR_MESSAGE, PASSWORD_LENGTH_MESSAGE, PASSWORD_MISMATCH_MESSAGE,
};

fn form_error(view: &ViewState) -> Option<String> {
    match view {
        ViewState::FormActive { error } => error.clone(),
        other => panic!("expected form, got {:?}", other),
    }
}

#[tokio::test]
async fn valid_passwords_reset_and_replace_history() {
    let mock = MockBackend::start(Reply::ok(), Reply::ok()).await;
    let backend = mock.backend();
    let mut flow = verified_flow(&backend).await;

    fill(&mut flow, "longenoughpass", "longenoughpass");
    let nav = submit(&mut flow, &backend).await;

    assert_eq!(nav, Some(Navigation::ReplaceHistory));
    assert_eq!(flow.view(), &ViewState::Success);
    assert!(!flow.is_submitting());
    assert_eq!(mock.reset_hits(), 1);

    let seen = mock.last_reset().expect("reset-password was not called");
    assert_eq!(seen.query.get("token").map(String::as_str), Some(TOKEN));
    assert_eq!(seen.query.get("id").map(String::as_str), Some(USER_ID));
    assert_eq!(seen.platform.as_deref(), Some("web"));
    assert_eq!(seen.body, Some(json!({ "password": "longenoughpass" })));
}

#[tokio::test]
async fn password_is_sent_untrimmed() {
    let mock = MockBackend::start(Reply::ok(), Reply::ok()).await;
    let backend = mock.backend();
    let mut flow = verified_flow(&backend).await;

    fill(&mut flow, "  longenoughpass ", "  longenoughpass ");
    submit(&mut flow, &backend).await;

    let seen = mock.last_reset().expect("reset-password was not called");
    assert_eq!(seen.body, Some(json!({ "password": "  longenoughpass " })));
}

#[tokio::test]
async fn local_failures_never_reach_the_backend() {
    let mock = MockBackend::start(Reply::ok(), Reply::ok()).await;
    let backend = mock.backend();
    let mut flow = verified_flow(&backend).await;

    fill(&mut flow, "short", "short");
    assert_eq!(submit(&mut flow, &backend).await, None);
    assert_eq!(form_error(flow.view()).as_deref(), Some(PASSWORD_LENGTH_MESSAGE));

    fill(&mut flow, &"x".repeat(21), &"x".repeat(21));
    assert_eq!(submit(&mut flow, &backend).await, None);
    assert_eq!(form_error(flow.view()).as_deref(), Some(PASSWORD_LENGTH_MESSAGE));

    fill(&mut flow, "longenoughpass", "longenoughpasz");
    assert_eq!(submit(&mut flow, &backend).await, None);
    assert_eq!(
        form_error(flow.view()).as_deref(),
        Some(PASSWORD_MISMATCH_MESSAGE)
    );

    assert_eq!(mock.reset_hits(), 0);
}

#[tokio::test]
async fn server_rejection_is_shown_on_the_form() {
    let mock = MockBackend::start(
        Reply::ok(),
        Reply::failure(StatusCode::BAD_REQUEST, "New password must be different!"),
    )
    .await;
    let backend = mock.backend();
    let mut flow = verified_flow(&backend).await;

    fill(&mut flow, "longenoughpass", "longenoughpass");
    let nav = submit(&mut flow, &backend).await;

    assert_eq!(nav, Some(Navigation::Stay));
    assert_eq!(
        form_error(flow.view()).as_deref(),
        Some("New password must be different!")
    );
    assert!(!flow.is_submitting());
}

#[tokio::test]
async fn failure_flag_on_ok_status_is_a_rejection() {
    let mock = MockBackend::start(
        Reply::ok(),
        Reply::failure(StatusCode::OK, "Reset token already used!"),
    )
    .await;
    let backend = mock.backend();
    let mut flow = verified_flow(&backend).await;

    fill(&mut flow, "longenoughpass", "longenoughpass");
    submit(&mut flow, &backend).await;

    assert_eq!(
        form_error(flow.view()).as_deref(),
        Some("Reset token already used!")
    );
}

#[tokio::test]
async fn unstructured_failure_shows_generic_message_and_allows_retry() {
    let mock = MockBackend::start(
        Reply::ok(),
        Reply::Text(StatusCode::BAD_GATEWAY, "upstream down"),
    )
    .await;
    let backend = mock.backend();
    let mut flow = verified_flow(&backend).await;

    fill(&mut flow, "longenoughpass", "longenoughpass");
    assert_eq!(submit(&mut flow, &backend).await, Some(Navigation::Stay));
    assert_eq!(form_error(flow.view()).as_deref(), Some(GENERIC_ERROR_MESSAGE));

    mock.set_reset(Reply::ok());
    assert_eq!(
        submit(&mut flow, &backend).await,
        Some(Navigation::ReplaceHistory)
    );
    assert_eq!(mock.reset_hits(), 2);
}

#[tokio::test]
async fn second_submit_while_in_flight_sends_nothing() {
    let mock = MockBackend::start(Reply::ok(), Reply::ok()).await;
    let backend = mock.backend();
    let mut flow = verified_flow(&backend).await;
    fill(&mut flow, "longenoughpass", "longenoughpass");

    let ticket = flow.begin_submit().expect("form should be valid");
    assert_eq!(flow.begin_submit(), None);

    let request = flow.request().clone();
    let outcome = client::api::reset_password(&backend, &request, &ticket, LIMIT).await;
    assert_eq!(flow.finish_submit(outcome), Navigation::ReplaceHistory);

    assert_eq!(mock.reset_hits(), 1);
}

#[tokio::test]
async fn success_is_terminal() {
    let mock = MockBackend::start(Reply::ok(), Reply::ok()).await;
    let backend = mock.backend();
    let mut flow = verified_flow(&backend).await;
    fill(&mut flow, "longenoughpass", "longenoughpass");
    submit(&mut flow, &backend).await;

    assert_eq!(submit(&mut flow, &backend).await, None);
    assert_eq!(flow.view(), &ViewState::Success);
    assert_eq!(mock.reset_hits(), 1);
}
