//! Human-verification challenge seam.
//!
//! ARCHITECTURE
//! ============
//! The page never touches the provider's globals. It hands the provider a
//! typed set of callbacks and gets back a widget handle. Dropping the handle
//! tears the widget down and releases whatever the provider loaded, so the
//! script lives exactly as long as the component that mounted it.

#[cfg(test)]
#[path = "challenge_test.rs"]
mod challenge_test;

use std::rc::Rc;

use crate::types::ChallengeToken;

/// Default provider script (Cloudflare Turnstile).
pub const DEFAULT_CHALLENGE_SCRIPT_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/api.js";
/// Public site key the widget renders with.
pub const DEFAULT_SITE_KEY: &str = "0x4AAAAAAA29gzBeeVpIOCwD";

/// Invoked with a fresh token each time the user passes the challenge.
pub type TokenCallback = Rc<dyn Fn(ChallengeToken)>;

/// Callbacks registered with a provider at mount time.
#[derive(Clone)]
pub struct ChallengeCallbacks {
    pub on_token: TokenCallback,
    /// Invoked when a previously issued token expires or the widget errors.
    pub on_expired: Rc<dyn Fn()>,
}

impl ChallengeCallbacks {
    pub fn new(on_token: impl Fn(ChallengeToken) + 'static, on_expired: impl Fn() + 'static) -> Self {
        Self { on_token: Rc::new(on_token), on_expired: Rc::new(on_expired) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChallengeError {
    #[error("no document available to mount the challenge into")]
    NoDocument,
    #[error("challenge script could not be loaded: {0}")]
    Script(String),
    #[error("challenge widget could not be rendered: {0}")]
    Render(String),
}

/// A mounted challenge widget. Dropping it releases the widget and its script.
pub trait ChallengeWidget {
    /// Ask the provider for a new challenge after the current token was spent.
    fn reset(&self);
}

/// Something that can mount a human-verification widget.
pub trait ChallengeProvider {
    type Widget: ChallengeWidget;

    /// Load the provider (if needed) and render a widget for `site_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ChallengeError`] when the provider cannot be loaded or rendered.
    fn mount(&self, site_key: &str, callbacks: ChallengeCallbacks) -> Result<Self::Widget, ChallengeError>;
}

/// Provider for callers that already hold a solved token (CLI, tests).
///
/// Mounting delivers the token immediately; every `reset` delivers it again.
#[derive(Clone, Debug, Default)]
pub struct PresolvedChallenge {
    token: Option<ChallengeToken>,
}

impl PresolvedChallenge {
    #[must_use]
    pub fn new(token: Option<ChallengeToken>) -> Self {
        Self { token }
    }
}

pub struct PresolvedWidget {
    token: Option<ChallengeToken>,
    callbacks: ChallengeCallbacks,
}

impl ChallengeWidget for PresolvedWidget {
    fn reset(&self) {
        if let Some(token) = &self.token {
            (self.callbacks.on_token)(token.clone());
        }
    }
}

impl ChallengeProvider for PresolvedChallenge {
    type Widget = PresolvedWidget;

    fn mount(&self, _site_key: &str, callbacks: ChallengeCallbacks) -> Result<Self::Widget, ChallengeError> {
        let widget = PresolvedWidget { token: self.token.clone(), callbacks };
        widget.reset();
        Ok(widget)
    }
}
