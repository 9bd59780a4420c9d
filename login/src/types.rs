//! Data model shared by the flow, the auth transports, and the page.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LoginError;
pub use crate::error::DEFAULT_FAILURE_MESSAGE;

/// Message shown when the auth service accepts the login without saying anything.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Welcome back!";

/// Email + password pair held only while the user is typing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque proof that the human-verification challenge was completed.
///
/// Never empty: [`ChallengeToken::new`] refuses blank input so holding a
/// token is enough to know submission is allowed.
#[derive(Clone, PartialEq, Eq)]
pub struct ChallengeToken(String);

impl ChallengeToken {
    /// Wrap a provider-issued token. Returns `None` for blank input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ChallengeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChallengeToken(<{} chars>)", self.0.len())
    }
}

/// JSON body posted to the auth service login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub token: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(credentials: &Credentials, token: &ChallengeToken) -> Self {
        Self {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
            token: token.as_str().to_owned(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Response body shape on both the accepted and rejected paths.
///
/// Unknown fields are ignored; only `message` is consumed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponseBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Auth service answer after its body parsed as JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthReply {
    pub status: u16,
    pub message: Option<String>,
}

impl AuthReply {
    #[must_use]
    pub fn new(status: u16, body: AuthResponseBody) -> Self {
        let message = body.message.filter(|m| !m.is_empty());
        Self { status, message }
    }

    /// True for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Map the reply onto the outcome the user sees.
    #[must_use]
    pub fn into_result(self) -> SubmissionResult {
        if self.is_success() {
            SubmissionResult::Success(self.message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_owned()))
        } else {
            SubmissionResult::Failure(LoginError::ServerRejected { status: self.status, message: self.message })
        }
    }
}

/// Outcome of one submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionResult {
    Success(String),
    Failure(LoginError),
}

impl SubmissionResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// User-facing message for this outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success(message) => message.clone(),
            Self::Failure(err) => err.to_string(),
        }
    }
}
