//! Error taxonomy for login attempts.
//!
//! `LoginError` is what the page shows; its `Display` is always safe to put
//! in front of a user. `TransportError` is what auth service transports
//! return and is folded into `LoginError::TransportOrParse` by the flow.

/// Message shown when the auth service rejects the login without a reason.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Login failed!";
/// Generic text for failures the user cannot act on.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// Submit was attempted before the challenge produced a token.
    #[error("Please complete the CAPTCHA")]
    ChallengeMissing,
    /// Submit was attempted while an earlier attempt is still running.
    #[error("A login is already in progress.")]
    InFlight,
    /// The auth service answered with a non-2xx status.
    #[error("{}", .message.as_deref().unwrap_or(DEFAULT_FAILURE_MESSAGE))]
    ServerRejected { status: u16, message: Option<String> },
    /// The request never completed or the body was not JSON.
    #[error("{}", GENERIC_ERROR_MESSAGE)]
    TransportOrParse { detail: String },
}

impl LoginError {
    /// Short machine-readable label, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChallengeMissing => "challenge_missing",
            Self::InFlight => "in_flight",
            Self::ServerRejected { .. } => "server_rejected",
            Self::TransportOrParse { .. } => "transport_or_parse",
        }
    }
}

impl From<TransportError> for LoginError {
    fn from(err: TransportError) -> Self {
        Self::TransportOrParse { detail: err.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("response body was not valid JSON: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}
