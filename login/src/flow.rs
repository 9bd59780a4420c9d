//! Login submission state machine.
//!
//! DESIGN
//! ======
//! `LoginForm` is plain data so the page can keep it in a signal and drive
//! it in two halves around the network await: [`LoginForm::begin_submit`]
//! gates on the challenge token and marks the form in flight,
//! [`LoginForm::finish_submit`] records the outcome and clears it.
//! [`LoginFlow`] composes both around an [`AuthService`] for callers that
//! can hold `&mut` across the await.
//!
//! States: `Idle -> Submitting -> {Succeeded | Failed}`, and back to `Idle`
//! on the next edit. The loading/error/success display is derived from the
//! single `FlowStatus`, so at most one of them is ever shown.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use crate::error::{LoginError, TransportError};
use crate::service::AuthService;
use crate::types::{AuthReply, ChallengeToken, Credentials, LoginRequest, SubmissionResult};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FlowStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(LoginError),
}

impl FlowStatus {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }
}

/// Client-side state of the sign-in form.
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    credentials: Credentials,
    token: Option<ChallengeToken>,
    status: FlowStatus,
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.credentials.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.credentials.password
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.status == FlowStatus::Submitting
    }

    /// Update the email. Returns `false` when the value did not change.
    pub fn set_email(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.credentials.email == value {
            return false;
        }
        self.credentials.email = value;
        self.settle_after_edit();
        true
    }

    /// Update the password. Returns `false` when the value did not change.
    pub fn set_password(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.credentials.password == value {
            return false;
        }
        self.credentials.password = value;
        self.settle_after_edit();
        true
    }

    /// Store the token delivered by the challenge provider.
    pub fn on_challenge_completed(&mut self, token: ChallengeToken) {
        self.token = Some(token);
    }

    /// Forget a token the provider reports as expired.
    pub fn on_challenge_expired(&mut self) {
        self.token = None;
    }

    /// Gate on the challenge token and mark the form in flight.
    ///
    /// The token is spent by the attempt: a resubmission needs a fresh one.
    /// `ChallengeMissing` is recorded on the form; `InFlight` leaves the
    /// running attempt untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::InFlight`] while another attempt is running and
    /// [`LoginError::ChallengeMissing`] when no token is held.
    pub fn begin_submit(&mut self) -> Result<LoginRequest, LoginError> {
        if self.in_flight() {
            return Err(LoginError::InFlight);
        }
        let Some(token) = self.token.take() else {
            self.status = FlowStatus::Failed(LoginError::ChallengeMissing);
            return Err(LoginError::ChallengeMissing);
        };
        self.status = FlowStatus::Submitting;
        Ok(LoginRequest::new(&self.credentials, &token))
    }

    /// Record what the auth service said and leave the in-flight state.
    pub fn finish_submit(&mut self, outcome: Result<AuthReply, TransportError>) -> SubmissionResult {
        let result = match outcome {
            Ok(reply) => {
                tracing::info!(status = reply.status, "auth service replied");
                reply.into_result()
            }
            Err(err) => {
                tracing::warn!(error = %err, "login request did not complete");
                SubmissionResult::Failure(err.into())
            }
        };
        self.status = match &result {
            SubmissionResult::Success(message) => FlowStatus::Succeeded(message.clone()),
            SubmissionResult::Failure(err) => FlowStatus::Failed(err.clone()),
        };
        result
    }

    /// Drop an in-flight attempt whose outcome will never arrive.
    pub fn abandon_submit(&mut self) {
        if self.in_flight() {
            self.status = FlowStatus::Idle;
        }
    }

    fn settle_after_edit(&mut self) {
        if self.status.is_terminal() {
            self.status = FlowStatus::Idle;
        }
    }
}

/// Clears the in-flight state if a submit future is dropped before it resolves.
struct InFlight<'a> {
    form: &'a mut LoginForm,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.form.abandon_submit();
    }
}

/// A [`LoginForm`] bound to the service it submits to.
pub struct LoginFlow<S> {
    form: LoginForm,
    service: S,
}

impl<S: AuthService> LoginFlow<S> {
    pub fn new(service: S) -> Self {
        Self { form: LoginForm::new(), service }
    }

    #[must_use]
    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn set_email(&mut self, value: impl Into<String>) -> bool {
        self.form.set_email(value)
    }

    pub fn set_password(&mut self, value: impl Into<String>) -> bool {
        self.form.set_password(value)
    }

    pub fn on_challenge_completed(&mut self, token: ChallengeToken) {
        self.form.on_challenge_completed(token);
    }

    pub fn on_challenge_expired(&mut self) {
        self.form.on_challenge_expired();
    }

    /// Submit the current credentials.
    ///
    /// Without a challenge token this returns `ChallengeMissing` and the
    /// service is never called.
    pub async fn submit(&mut self) -> SubmissionResult {
        let request = match self.form.begin_submit() {
            Ok(request) => request,
            Err(err) => return SubmissionResult::Failure(err),
        };
        let mut guard = InFlight { form: &mut self.form };
        let outcome = self.service.login(&request).await;
        guard.form.finish_submit(outcome)
    }
}
