use crate::routes::{ResetQuery, Route};
use client::api::HttpBackend;
use client::flow::{Navigation, ResetFlow};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdShield, LdUserCheck};
use dioxus_free_icons::Icon;
use shared_types::{CredentialField, CredentialInput, ViewState};
use shared_ui::{
    Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Input, Label,
};

const PASSWORD_PLACEHOLDER: &str = "* * * * * * * * * * ";

/// Reset password page. Verifies the token/id pair from the email link once,
/// then lets the user choose a new password.
#[component]
pub fn ResetPassword(query: ResetQuery) -> Element {
    // Captured on mount; the history replace after success must not re-verify.
    let request = use_hook(|| query.to_request());
    let mut flow = use_signal(|| ResetFlow::new(request.clone()));
    let backend = use_context::<HttpBackend>();
    let nav = use_navigator();

    // Reads no signals, so it runs once. Dropped with the page if it unmounts first.
    let _verification = use_resource({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            let request = request.clone();
            async move {
                let limit = backend.api().request_timeout();
                let outcome = client::api::verify_token(&backend, &request, limit).await;
                flow.write().finish_verify(outcome);
            }
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let backend = backend.clone();
        async move {
            let Some(ticket) = flow.write().begin_submit() else {
                return;
            };
            let request = flow.peek().request().clone();
            let limit = backend.api().request_timeout();

            let outcome = client::api::reset_password(&backend, &request, &ticket, limit).await;
            if flow.write().finish_submit(outcome) == Navigation::ReplaceHistory {
                // Drop token and id from the address bar.
                tracing::debug!("Replacing reset link with bare reset route");
                nav.replace(Route::bare_reset());
            }
        }
    };

    let (view, input, busy) = {
        let state = flow.read();
        (state.view().clone(), state.input().clone(), state.is_submitting())
    };

    rsx! {
        ResetPasswordPanel {
            view,
            input,
            busy,
            on_field: move |(field, value): (CredentialField, String)| {
                flow.write().set_field(field, value);
            },
            on_submit: handle_submit,
        }
    }
}

/// Stateless rendering of one [`ViewState`].
#[component]
pub fn ResetPasswordPanel(
    view: ViewState,
    input: CredentialInput,
    busy: bool,
    on_field: EventHandler<(CredentialField, String)>,
    on_submit: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./reset_password.css") }

        div { class: "reset-page",
            match &view {
                ViewState::Verifying => rsx! {
                    div { class: "reset-status",
                        h1 { "Verifying reset token . . ." }
                    }
                },
                ViewState::InvalidToken(message) | ViewState::Unavailable(message) => rsx! {
                    div { class: "reset-status reset-status-error",
                        Icon::<LdShield> { icon: LdShield, width: 32, height: 32 }
                        h1 { "{message}" }
                    }
                },
                ViewState::Success => rsx! {
                    div { class: "reset-status reset-status-success",
                        Icon::<LdUserCheck> { icon: LdUserCheck, width: 32, height: 32 }
                        h1 { "Password reset successfully . . ." }
                    }
                },
                ViewState::FormActive { error } => rsx! {
                    Card { class: "reset-card",
                        CardHeader {
                            CardTitle { "Reset Password" }
                            CardDescription { "Choose a new password for your account" }
                        }
                        CardContent {
                            form {
                                class: "reset-form",
                                onsubmit: move |evt| on_submit.call(evt),

                                if let Some(message) = error {
                                    p { class: "reset-error", role: "alert", "{message}" }
                                }

                                div { class: "reset-field",
                                    Label { html_for: "password", "New Password" }
                                    Input {
                                        id: "password",
                                        name: CredentialField::Password.name().to_string(),
                                        input_type: "password",
                                        autocomplete: "new-password",
                                        placeholder: PASSWORD_PLACEHOLDER.to_string(),
                                        value: input.password.clone(),
                                        disabled: busy,
                                        on_input: move |evt: FormEvent| {
                                            on_field.call((CredentialField::Password, evt.value()));
                                        },
                                    }
                                }

                                div { class: "reset-field",
                                    Label { html_for: "confirmPassword", "Confirm Password" }
                                    Input {
                                        id: "confirmPassword",
                                        name: CredentialField::ConfirmPassword.name().to_string(),
                                        input_type: "password",
                                        autocomplete: "new-password",
                                        placeholder: PASSWORD_PLACEHOLDER.to_string(),
                                        value: input.confirm_password.clone(),
                                        disabled: busy,
                                        on_input: move |evt: FormEvent| {
                                            on_field.call((CredentialField::ConfirmPassword, evt.value()));
                                        },
                                    }
                                }

                                Button {
                                    button_type: "submit",
                                    disabled: busy,
                                    if busy { "Resetting..." } else { "Reset Password" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
