//! Login submission flow for the Arvon sign-in page.
//!
//! This crate owns everything about signing in that does not depend on a
//! rendering layer: the credential and challenge-token model, the
//! [`flow::LoginFlow`] state machine, the [`service::AuthService`] and
//! [`challenge::ChallengeProvider`] seams, and the notifications derived from
//! each outcome. The Leptos `client` crate and the `cli` binary both drive
//! the same flow.

pub mod challenge;
pub mod config;
pub mod error;
pub mod flow;
pub mod notice;
pub mod service;
pub mod types;

pub use error::{LoginError, TransportError};
pub use flow::{FlowStatus, LoginFlow, LoginForm};
pub use service::AuthService;
pub use types::{AuthReply, ChallengeToken, Credentials, LoginRequest, SubmissionResult};
