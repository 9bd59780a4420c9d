//! What the page shows after each attempt: inline text and a toast.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use crate::error::LoginError;
use crate::flow::FlowStatus;
use crate::types::SubmissionResult;

/// How long a toast stays up unless the user closes it.
pub const DEFAULT_TOAST_DURATION_MS: u32 = 5000;

const INLINE_SUCCESS: &str = "Login successful!";
const REJECTED_TOAST_FALLBACK: &str = "Please try again.";
const TRANSPORT_TOAST_DESCRIPTION: &str = "Something went wrong, please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    /// CSS modifier used by the toast stack.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Transient notification raised for a finished attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
    pub duration_ms: u32,
    pub closable: bool,
}

impl Toast {
    /// Build the toast for an attempt. `InFlight` has none.
    #[must_use]
    pub fn for_result(result: &SubmissionResult, duration_ms: u32) -> Option<Self> {
        let (kind, title, description) = match result {
            SubmissionResult::Success(message) => (NoticeKind::Success, "Login Successful", message.clone()),
            SubmissionResult::Failure(err) => match err {
                LoginError::ChallengeMissing => (NoticeKind::Warning, "Verification Required", err.to_string()),
                LoginError::InFlight => return None,
                LoginError::ServerRejected { message, .. } => {
                    let description = message.clone().unwrap_or_else(|| REJECTED_TOAST_FALLBACK.to_owned());
                    (NoticeKind::Error, "Login Failed", description)
                }
                LoginError::TransportOrParse { .. } => {
                    (NoticeKind::Error, "Error", TRANSPORT_TOAST_DESCRIPTION.to_owned())
                }
            },
        };
        Some(Self { kind, title: title.to_owned(), description, duration_ms, closable: true })
    }
}

/// Status line rendered under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineMessage {
    Success(String),
    Error(String),
}

impl InlineMessage {
    #[must_use]
    pub fn from_status(status: &FlowStatus) -> Option<Self> {
        match status {
            FlowStatus::Idle | FlowStatus::Submitting => None,
            FlowStatus::Succeeded(_) => Some(Self::Success(INLINE_SUCCESS.to_owned())),
            FlowStatus::Failed(err) => Some(Self::Error(err.to_string())),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }
}
