//! `arvon-login`: run one sign-in attempt against an auth deployment.
//!
//! The challenge step is pre-solved: pass a token minted elsewhere with
//! `--token`, or leave it out to watch the attempt stop before the network.

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use login::challenge::{ChallengeCallbacks, ChallengeProvider, PresolvedChallenge};
use login::config::LoginConfig;
use login::error::ConfigError;
use login::notice::InlineMessage;
use login::service::HttpAuthService;
use login::{AuthService, ChallengeToken, LoginFlow, SubmissionResult, TransportError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client setup failed: {0}")]
    Client(#[from] TransportError),
    #[error("challenge setup failed: {0}")]
    Challenge(#[from] login::challenge::ChallengeError),
}

#[derive(Parser, Debug)]
#[command(name = "arvon-login", about = "Sign into an Arvon auth service from the terminal")]
struct Cli {
    /// Login endpoint; overrides the configured default.
    #[arg(long, env = "ARVON_AUTH_URL")]
    auth_url: Option<String>,

    #[arg(long)]
    email: String,

    #[arg(long, env = "ARVON_PASSWORD", hide_env_values = true)]
    password: String,

    /// Pre-solved challenge token.
    #[arg(long, env = "ARVON_CHALLENGE_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

/// A finished attempt and the status line the page would show for it.
#[derive(Debug)]
struct Attempt {
    result: SubmissionResult,
    inline: Option<InlineMessage>,
}

impl Attempt {
    fn line(&self) -> String {
        self.inline.as_ref().map_or_else(|| self.result.message(), |m| m.text().to_owned())
    }

    fn exit_code(&self) -> ExitCode {
        if self.result.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match load_config(|key| std::env::var(key).ok(), cli.auth_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &config).await {
        Ok(attempt) => {
            println!("{}", attempt.line());
            attempt.exit_code()
        }
        Err(e) => {
            tracing::error!(error = %e, "login attempt could not start");
            ExitCode::FAILURE
        }
    }
}

/// Environment config with `--auth-url` taking precedence.
fn load_config<F>(env: F, auth_url: Option<&str>) -> Result<LoginConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    LoginConfig::from_lookup(|key| match (key, auth_url) {
        ("ARVON_AUTH_URL", Some(url)) => Some(url.to_owned()),
        _ => env(key),
    })
}

/// Deliver the pre-solved token the way the browser widget would.
fn solve_challenge<S: AuthService>(flow: &mut LoginFlow<S>, site_key: &str, token: Option<String>) -> Result<(), CliError> {
    let delivered = Rc::new(RefCell::new(None::<ChallengeToken>));
    let sink = Rc::clone(&delivered);
    let provider = PresolvedChallenge::new(token.and_then(ChallengeToken::new));
    let _widget = provider.mount(site_key, ChallengeCallbacks::new(move |t| *sink.borrow_mut() = Some(t), || {}))?;
    if let Some(token) = delivered.borrow_mut().take() {
        flow.on_challenge_completed(token);
    }
    Ok(())
}

async fn run(cli: Cli, config: &LoginConfig) -> Result<Attempt, CliError> {
    let service = HttpAuthService::from_config(config)?;
    tracing::info!(url = service.login_url(), email = %cli.email, "submitting login");
    attempt(LoginFlow::new(service), cli, &config.site_key).await
}

async fn attempt<S: AuthService>(mut flow: LoginFlow<S>, cli: Cli, site_key: &str) -> Result<Attempt, CliError> {
    flow.set_email(cli.email);
    flow.set_password(cli.password);
    solve_challenge(&mut flow, site_key, cli.token)?;

    let result = flow.submit().await;
    let inline = InlineMessage::from_status(flow.form().status());
    Ok(Attempt { result, inline })
}
