//! Sign-in page: email and password, gated by a human-verification widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page keeps a `login::LoginForm` in a signal. The Turnstile widget
//! writes tokens into it; the submit handler runs `begin_submit`, posts
//! through `GlooAuthService`, then applies the reply with `finish_submit`.
//!
//! ERROR HANDLING
//! ==============
//! Every finished attempt raises a toast. A submit while a request is still
//! pending is dropped without feedback.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use login::config::LoginConfig;
use login::notice::{InlineMessage, Toast};
use login::{LoginError, LoginForm, SubmissionResult};

use crate::state::toasts::ToastState;
use crate::util::turnstile::CHALLENGE_CONTAINER_ID;

pub const HEADING: &str = "Sign into Arvon";
pub const SUBMIT_LABEL: &str = "Login";
pub const SUBMITTING_LABEL: &str = "Logging in...";

pub fn button_label(in_flight: bool) -> &'static str {
    if in_flight { SUBMITTING_LABEL } else { SUBMIT_LABEL }
}

pub fn inline_class(message: &InlineMessage) -> &'static str {
    match message {
        InlineMessage::Success(_) => "login-message login-message--success",
        InlineMessage::Error(_) => "login-message login-message--error",
    }
}

/// Toast to raise for the result of `begin_submit`. `None` when the request
/// went out, or when the form was already busy.
pub fn begin_failure_toast(begun: &Result<login::LoginRequest, LoginError>, duration_ms: u32) -> Option<Toast> {
    match begun {
        Ok(_) | Err(LoginError::InFlight) => None,
        Err(err) => Toast::for_result(&SubmissionResult::Failure(err.clone()), duration_ms),
    }
}

/// Push a toast and schedule its expiry.
fn raise_toast(toasts: RwSignal<ToastState>, toast: Toast) {
    let duration_ms = toast.duration_ms;
    let id = toasts.try_update(|t| t.push(toast));

    #[cfg(feature = "csr")]
    if let Some(id) = id {
        gloo_timers::callback::Timeout::new(duration_ms, move || {
            toasts.try_update(|t| t.dismiss(id));
        })
        .forget();
    }
    #[cfg(not(feature = "csr"))]
    let _ = (id, duration_ms);
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = StoredValue::new(LoginConfig::default());
    let form = RwSignal::new(LoginForm::new());

    #[cfg(feature = "csr")]
    let widget = StoredValue::new_local(None::<crate::util::turnstile::TurnstileWidget>);

    #[cfg(feature = "csr")]
    {
        use login::challenge::{ChallengeCallbacks, ChallengeProvider};

        use crate::util::turnstile::TurnstileProvider;

        Effect::new(move |_| {
            if widget.with_value(Option::is_some) {
                return;
            }
            let (script_url, site_key) = config.with_value(|c| (c.challenge_script_url.clone(), c.site_key.clone()));
            let provider = TurnstileProvider::new(script_url, CHALLENGE_CONTAINER_ID);
            let callbacks = ChallengeCallbacks::new(
                move |token| form.update(|f| f.on_challenge_completed(token)),
                move || form.update(LoginForm::on_challenge_expired),
            );
            match provider.mount(&site_key, callbacks) {
                Ok(mounted) => widget.set_value(Some(mounted)),
                Err(err) => log::warn!("challenge unavailable: {err}"),
            }
        });
        on_cleanup(move || {
            widget.try_update_value(Option::take);
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let duration_ms = config.with_value(|c| c.toast_duration_ms);
        let Some(begun) = form.try_update(LoginForm::begin_submit) else {
            return;
        };
        if let Some(toast) = begin_failure_toast(&begun, duration_ms) {
            raise_toast(toasts, toast);
        }
        let Ok(request) = begun else {
            return;
        };

        #[cfg(feature = "csr")]
        {
            use login::AuthService;
            use login::challenge::ChallengeWidget;

            use crate::net::api::GlooAuthService;

            // The token is spent; the fresh one the widget delivers is for the next attempt.
            widget.with_value(|w| {
                if let Some(w) = w {
                    w.reset();
                }
            });
            let service = GlooAuthService::new(config.with_value(|c| c.login_url.clone()));
            leptos::task::spawn_local(async move {
                let outcome = service.login(&request).await;
                let Some(result) = form.try_update(|f| f.finish_submit(outcome)) else {
                    return;
                };
                if let Some(toast) = Toast::for_result(&result, duration_ms) {
                    raise_toast(toasts, toast);
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            form.update(LoginForm::abandon_submit);
        }
    };

    let in_flight = move || form.with(LoginForm::in_flight);
    let site_key = config.with_value(|c| c.site_key.clone());

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{HEADING}</h1>
                <form class="login-form" on:submit=on_submit>
                    <label class="login-label" for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        required
                        prop:value=move || form.with(|f| f.email().to_owned())
                        on:input=move |ev| form.maybe_update(|f| f.set_email(event_target_value(&ev)))
                    />
                    <label class="login-label" for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        required
                        prop:value=move || form.with(|f| f.password().to_owned())
                        on:input=move |ev| form.maybe_update(|f| f.set_password(event_target_value(&ev)))
                    />
                    <div id=CHALLENGE_CONTAINER_ID class="cf-turnstile login-challenge" data-sitekey=site_key></div>
                    <button class="login-button" type="submit" disabled=in_flight>
                        {move || button_label(in_flight())}
                    </button>
                </form>
                {move || {
                    form.with(|f| InlineMessage::from_status(f.status()))
                        .map(|message| {
                            let class = inline_class(&message);
                            let text = message.text().to_owned();
                            view! { <p class=class>{text}</p> }
                        })
                }}
                <div class="login-links">
                    <a href="/register">"Create an account"</a>
                    <a href="/forgot-password">"Forgot password?"</a>
                </div>
            </div>
        </div>
    }
}
