//! Browser auth service for the sign-in page.
//!
//! Browser (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: a stub that reports the transport as unavailable.
//!
//! ERROR HANDLING
//! ==============
//! Every failure comes back as a `TransportError`; the flow turns it into
//! the generic user-facing message and the detail only reaches the console.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use login::error::TransportError;
use login::{AuthReply, AuthService, LoginRequest};

#[cfg(not(feature = "csr"))]
const NO_BROWSER: &str = "fetch is only available in the browser";

/// `POST`s login requests to the configured auth endpoint with `fetch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlooAuthService {
    login_url: String,
}

impl GlooAuthService {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self { login_url: login_url.into() }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

#[cfg(any(test, feature = "csr"))]
fn network_error(err: impl std::fmt::Display) -> TransportError {
    TransportError::Network(err.to_string())
}

#[async_trait(?Send)]
impl AuthService for GlooAuthService {
    async fn login(&self, request: &LoginRequest) -> Result<AuthReply, TransportError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.login_url)
                .json(request)
                .map_err(network_error)?
                .send()
                .await
                .map_err(network_error)?;
            let status = resp.status();
            let bytes = resp.binary().await.map_err(network_error)?;
            let body = login::service::parse_response_body(&bytes)?;
            Ok(AuthReply::new(status, body))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError::Network(NO_BROWSER.to_owned()))
        }
    }
}
