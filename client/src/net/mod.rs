//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements `login::AuthService` over the browser fetch API.

pub mod api;
