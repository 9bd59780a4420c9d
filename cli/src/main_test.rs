use std::cell::RefCell;

use async_trait::async_trait;
use login::{AuthReply, LoginError, LoginRequest};

use super::*;

struct StubAuth {
    reply: Result<AuthReply, TransportError>,
    seen: RefCell<Vec<LoginRequest>>,
}

impl StubAuth {
    fn replying(status: u16, message: Option<&str>) -> Self {
        Self { reply: Ok(AuthReply { status, message: message.map(str::to_owned) }), seen: RefCell::new(Vec::new()) }
    }
}

#[async_trait(?Send)]
impl AuthService for StubAuth {
    async fn login(&self, request: &LoginRequest) -> Result<AuthReply, TransportError> {
        self.seen.borrow_mut().push(request.clone());
        self.reply.clone()
    }
}

fn cli(token: Option<&str>) -> Cli {
    Cli {
        auth_url: None,
        email: "user@example.com".to_owned(),
        password: "hunter2".to_owned(),
        token: token.map(str::to_owned),
    }
}

// =============================================================================
// Argument parsing
// =============================================================================

#[test]
fn token_flag_is_optional() {
    let parsed = Cli::try_parse_from(["arvon-login", "--email", "a@b.com", "--password", "pw"]).unwrap();
    assert_eq!(parsed.email, "a@b.com");
    assert_eq!(parsed.password, "pw");
}

#[test]
fn email_is_required() {
    assert!(Cli::try_parse_from(["arvon-login", "--password", "pw"]).is_err());
}

// =============================================================================
// load_config
// =============================================================================

#[test]
fn auth_url_flag_overrides_environment() {
    let env = |key: &str| (key == "ARVON_AUTH_URL").then(|| "https://env.example/auth/login".to_owned());
    let config = load_config(env, Some("https://flag.example/auth/login")).unwrap();
    assert_eq!(config.login_url, "https://flag.example/auth/login");
}

#[test]
fn environment_used_without_flag() {
    let env = |key: &str| (key == "ARVON_AUTH_URL").then(|| "https://env.example/auth/login".to_owned());
    let config = load_config(env, None).unwrap();
    assert_eq!(config.login_url, "https://env.example/auth/login");
}

#[test]
fn invalid_flag_url_is_rejected() {
    assert!(load_config(|_: &str| None, Some("ftp://nope")).is_err());
}

// =============================================================================
// attempt
// =============================================================================

#[tokio::test]
async fn presolved_token_reaches_the_service() {
    let flow = LoginFlow::new(StubAuth::replying(200, Some("Welcome back!")));
    let outcome = attempt(flow, cli(Some("tok-1")), "site").await.unwrap();

    assert!(outcome.result.is_success());
    assert_eq!(outcome.line(), "Login successful!");
    assert_eq!(outcome.exit_code(), ExitCode::SUCCESS);
}

#[tokio::test]
async fn missing_token_fails_before_the_network() {
    let flow = LoginFlow::new(StubAuth::replying(200, None));
    let outcome = attempt(flow, cli(None), "site").await.unwrap();

    assert_eq!(outcome.result, SubmissionResult::Failure(LoginError::ChallengeMissing));
    assert_eq!(outcome.line(), "Please complete the CAPTCHA");
    assert_eq!(outcome.exit_code(), ExitCode::FAILURE);
}

#[tokio::test]
async fn blank_token_counts_as_missing() {
    let flow = LoginFlow::new(StubAuth::replying(200, None));
    let outcome = attempt(flow, cli(Some("   ")), "site").await.unwrap();
    assert_eq!(outcome.result, SubmissionResult::Failure(LoginError::ChallengeMissing));
}

#[tokio::test]
async fn rejection_prints_server_message() {
    let flow = LoginFlow::new(StubAuth::replying(401, Some("Invalid credentials")));
    let outcome = attempt(flow, cli(Some("tok")), "site").await.unwrap();

    assert_eq!(outcome.line(), "Invalid credentials");
    assert_eq!(outcome.exit_code(), ExitCode::FAILURE);
}

#[test]
fn solve_challenge_delivers_token_once() {
    let mut flow = LoginFlow::new(StubAuth::replying(200, None));
    solve_challenge(&mut flow, "site", Some("tok".to_owned())).unwrap();
    assert!(flow.form().has_token());
}
