use std::time::Duration;

use crate::common::*;
use client::flow::{Navigation, ResetFlow, VERIFY_UNAVAILABLE_MESSAGE};
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, ViewState, GENERIC_ERROR_MESSAGE};

const SHORT: Duration = Duration::from_millis(200);

#[tokio::test]
async fn hung_verification_times_out_to_fallback() {
    let mock = MockBackend::start(Reply::Hang, Reply::ok()).await;
    let backend = mock.backend();

    let mut flow = ResetFlow::new(reset_request());
    let outcome = client::api::verify_token(&backend, flow.request(), SHORT).await;
    assert_eq!(
        outcome.as_ref().map_err(|e| e.kind),
        Err(AppErrorKind::Timeout)
    );

    flow.finish_verify(outcome);
    assert_eq!(
        flow.view(),
        &ViewState::Unavailable(VERIFY_UNAVAILABLE_MESSAGE.into())
    );
}

#[tokio::test]
async fn hung_reset_times_out_and_frees_the_form() {
    let mock = MockBackend::start(Reply::ok(), Reply::Hang).await;
    let backend = mock.backend();
    let mut flow = verified_flow(&backend).await;
    fill(&mut flow, "longenoughpass", "longenoughpass");

    let ticket = flow.begin_submit().expect("form should be valid");
    let request = flow.request().clone();
    let outcome = client::api::reset_password(&backend, &request, &ticket, SHORT).await;
    assert_eq!(
        outcome.as_ref().map_err(|e| e.kind),
        Err(AppErrorKind::Timeout)
    );

    assert_eq!(flow.finish_submit(outcome), Navigation::Stay);
    assert_eq!(
        flow.view(),
        &ViewState::FormActive {
            error: Some(GENERIC_ERROR_MESSAGE.into())
        }
    );
    assert!(!flow.is_submitting());
}
