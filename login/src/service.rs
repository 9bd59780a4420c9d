//! Auth service seam and its native HTTP transport.
//!
//! `AuthService::login` only reports what the service said (status + parsed
//! body) or that it could not be reached; deciding what that means for the
//! user is left to [`crate::flow::LoginForm::finish_submit`].

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::{AuthReply, AuthResponseBody, LoginRequest};

/// Default login endpoint of the local auth service.
pub const DEFAULT_LOGIN_URL: &str = "http://localhost:3005/auth/login";

/// Remote collaborator that verifies credentials.
///
/// Futures are not required to be `Send` so browser transports can
/// implement this directly.
#[async_trait(?Send)]
pub trait AuthService {
    /// `POST` the credentials and challenge token.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request fails or the body is not JSON.
    async fn login(&self, request: &LoginRequest) -> Result<AuthReply, TransportError>;
}

/// Parse a response body into the fields the flow consumes.
///
/// A body with nothing but whitespace counts as `{}`.
///
/// # Errors
///
/// Returns [`TransportError::Decode`] when the body is not a JSON object or
/// its `message` is neither a string nor `null`.
pub fn parse_response_body(bytes: &[u8]) -> Result<AuthResponseBody, TransportError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(AuthResponseBody::default());
    }
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(decode_error)?;
    // Derived struct decoding would also accept an array in field order.
    if !value.is_object() {
        return Err(TransportError::Decode("response body is not a JSON object".to_owned()));
    }
    serde_json::from_value(value).map_err(decode_error)
}

fn decode_error(err: serde_json::Error) -> TransportError {
    TransportError::Decode(err.to_string())
}

#[cfg(feature = "http")]
pub use http::HttpAuthService;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{AuthService, parse_response_body};
    use crate::config::LoginConfig;
    use crate::error::TransportError;
    use crate::types::{AuthReply, LoginRequest};

    /// `reqwest`-backed auth service for native callers.
    #[derive(Clone, Debug)]
    pub struct HttpAuthService {
        client: reqwest::Client,
        login_url: String,
    }

    impl HttpAuthService {
        /// Build a client for `login_url` with the given request timeout.
        ///
        /// # Errors
        ///
        /// Returns [`TransportError::Network`] if the HTTP client cannot be built.
        pub fn new(login_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Ok(Self { client, login_url: login_url.into() })
        }

        /// # Errors
        ///
        /// Returns [`TransportError::Network`] if the HTTP client cannot be built.
        pub fn from_config(config: &LoginConfig) -> Result<Self, TransportError> {
            Self::new(config.login_url.clone(), Duration::from_secs(config.request_timeout_secs))
        }

        #[must_use]
        pub fn login_url(&self) -> &str {
            &self.login_url
        }
    }

    #[async_trait(?Send)]
    impl AuthService for HttpAuthService {
        async fn login(&self, request: &LoginRequest) -> Result<AuthReply, TransportError> {
            let resp = self
                .client
                .post(&self.login_url)
                .json(request)
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = resp.status().as_u16();
            let bytes = resp
                .bytes()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let body = parse_response_body(&bytes)?;
            Ok(AuthReply::new(status, body))
        }
    }
}
