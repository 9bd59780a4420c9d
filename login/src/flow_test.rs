use std::cell::{Cell, RefCell};
use std::future::Future;
use std::task::{Context, Poll, Waker};

use async_trait::async_trait;

use super::*;

// =============================================================================
// MockAuth
// =============================================================================

struct MockAuth {
    outcome: Result<AuthReply, TransportError>,
    calls: Cell<usize>,
    last_request: RefCell<Option<LoginRequest>>,
}

impl MockAuth {
    fn replying(status: u16, message: Option<&str>) -> Self {
        Self::with_outcome(Ok(AuthReply { status, message: message.map(str::to_owned) }))
    }

    fn with_outcome(outcome: Result<AuthReply, TransportError>) -> Self {
        Self { outcome, calls: Cell::new(0), last_request: RefCell::new(None) }
    }
}

#[async_trait(?Send)]
impl AuthService for MockAuth {
    async fn login(&self, request: &LoginRequest) -> Result<AuthReply, TransportError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        self.outcome.clone()
    }
}

/// Never resolves; used to drop a submit mid-flight.
struct PendingAuth;

#[async_trait(?Send)]
impl AuthService for PendingAuth {
    async fn login(&self, _request: &LoginRequest) -> Result<AuthReply, TransportError> {
        std::future::pending().await
    }
}

fn token(raw: &str) -> ChallengeToken {
    ChallengeToken::new(raw).unwrap()
}

fn ready_flow(service: MockAuth) -> LoginFlow<MockAuth> {
    let mut flow = LoginFlow::new(service);
    flow.set_email("user@example.com");
    flow.set_password("hunter2");
    flow.on_challenge_completed(token("tok-1"));
    flow
}

// =============================================================================
// Challenge gating
// =============================================================================

#[tokio::test]
async fn submit_without_token_never_calls_service() {
    let mut flow = LoginFlow::new(MockAuth::replying(200, None));
    flow.set_email("user@example.com");
    flow.set_password("hunter2");

    let result = flow.submit().await;

    assert_eq!(result, SubmissionResult::Failure(LoginError::ChallengeMissing));
    assert_eq!(flow.service.calls.get(), 0);
    assert!(!flow.form().in_flight());
    assert_eq!(flow.form().status(), &FlowStatus::Failed(LoginError::ChallengeMissing));
}

#[tokio::test]
async fn expired_token_blocks_submission() {
    let mut flow = ready_flow(MockAuth::replying(200, None));
    flow.on_challenge_expired();

    let result = flow.submit().await;

    assert_eq!(result, SubmissionResult::Failure(LoginError::ChallengeMissing));
    assert_eq!(flow.service.calls.get(), 0);
}

// =============================================================================
// Service outcomes
// =============================================================================

#[tokio::test]
async fn success_uses_server_message_and_clears_in_flight() {
    let mut flow = ready_flow(MockAuth::replying(200, Some("Welcome back!")));

    let result = flow.submit().await;

    assert_eq!(result, SubmissionResult::Success("Welcome back!".to_owned()));
    assert!(!flow.form().in_flight());
    assert_eq!(flow.form().status(), &FlowStatus::Succeeded("Welcome back!".to_owned()));
}

#[tokio::test]
async fn request_carries_credentials_and_token() {
    let mut flow = ready_flow(MockAuth::replying(200, None));
    flow.submit().await;

    let sent = flow.service.last_request.borrow().clone().unwrap();
    assert_eq!(sent.email, "user@example.com");
    assert_eq!(sent.password, "hunter2");
    assert_eq!(sent.token, "tok-1");
}

#[tokio::test]
async fn success_without_message_uses_default() {
    let mut flow = ready_flow(MockAuth::replying(200, None));
    assert_eq!(flow.submit().await, SubmissionResult::Success("Welcome back!".to_owned()));
}

#[tokio::test]
async fn rejection_surfaces_server_message() {
    let mut flow = ready_flow(MockAuth::replying(401, Some("Invalid credentials")));

    let result = flow.submit().await;

    assert!(!result.is_success());
    assert_eq!(result.message(), "Invalid credentials");
    assert!(matches!(result, SubmissionResult::Failure(LoginError::ServerRejected { status: 401, .. })));
    assert!(!flow.form().in_flight());
}

#[tokio::test]
async fn rejection_without_message_uses_default() {
    let mut flow = ready_flow(MockAuth::replying(500, None));
    assert_eq!(flow.submit().await.message(), "Login failed!");
}

#[tokio::test]
async fn transport_failure_is_generic_and_clears_in_flight() {
    let mut flow =
        ready_flow(MockAuth::with_outcome(Err(TransportError::Network("connection refused".to_owned()))));

    let result = flow.submit().await;

    assert_eq!(result.message(), "An error occurred. Please try again.");
    assert!(matches!(result, SubmissionResult::Failure(LoginError::TransportOrParse { .. })));
    assert!(!flow.form().in_flight());
}

#[tokio::test]
async fn decode_failure_is_generic() {
    let mut flow = ready_flow(MockAuth::with_outcome(Err(TransportError::Decode("expected value".to_owned()))));
    assert_eq!(flow.submit().await.message(), "An error occurred. Please try again.");
}

// =============================================================================
// Token lifecycle
// =============================================================================

#[tokio::test]
async fn token_is_spent_by_an_attempt() {
    let mut flow = ready_flow(MockAuth::replying(401, Some("Invalid credentials")));
    flow.submit().await;
    assert!(!flow.form().has_token());

    let retry = flow.submit().await;
    assert_eq!(retry, SubmissionResult::Failure(LoginError::ChallengeMissing));
    assert_eq!(flow.service.calls.get(), 1);

    flow.on_challenge_completed(token("tok-2"));
    flow.submit().await;
    assert_eq!(flow.service.calls.get(), 2);
    assert_eq!(flow.service.last_request.borrow().as_ref().map(|r| r.token.clone()), Some("tok-2".to_owned()));
}

#[test]
fn dropped_submit_releases_in_flight() {
    let mut flow = LoginFlow::new(PendingAuth);
    flow.on_challenge_completed(token("tok"));

    {
        let mut fut = Box::pin(flow.submit());
        let mut cx = Context::from_waker(Waker::noop());
        assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));
    }

    assert!(!flow.form().in_flight());
    assert_eq!(flow.form().status(), &FlowStatus::Idle);
}

// =============================================================================
// LoginForm state machine
// =============================================================================

#[test]
fn begin_submit_refuses_while_in_flight() {
    let mut form = LoginForm::new();
    form.on_challenge_completed(token("a"));
    assert!(form.begin_submit().is_ok());
    assert!(form.in_flight());

    form.on_challenge_completed(token("b"));
    assert_eq!(form.begin_submit(), Err(LoginError::InFlight));
    assert!(form.in_flight());
    assert!(form.has_token());
}

#[test]
fn repeated_same_value_edits_are_no_ops() {
    let mut form = LoginForm::new();
    assert!(form.set_email("a@b.com"));
    assert!(!form.set_email("a@b.com"));
    assert!(form.set_password("pw"));
    assert!(!form.set_password("pw"));
    assert_eq!(form.email(), "a@b.com");
    assert_eq!(form.password(), "pw");
}

#[test]
fn same_value_edit_keeps_terminal_status() {
    let mut form = LoginForm::new();
    form.set_email("a@b.com");
    assert!(form.begin_submit().is_err());

    form.set_email("a@b.com");
    assert_eq!(form.status(), &FlowStatus::Failed(LoginError::ChallengeMissing));
}

#[test]
fn edit_after_outcome_returns_to_idle() {
    let mut form = LoginForm::new();
    form.on_challenge_completed(token("t"));
    form.begin_submit().unwrap();
    form.finish_submit(Ok(AuthReply { status: 200, message: None }));
    assert!(form.status().is_terminal());

    form.set_password("new");
    assert_eq!(form.status(), &FlowStatus::Idle);
}

#[test]
fn edit_while_submitting_keeps_in_flight() {
    let mut form = LoginForm::new();
    form.on_challenge_completed(token("t"));
    form.begin_submit().unwrap();

    form.set_email("late@edit.com");
    assert!(form.in_flight());
}
