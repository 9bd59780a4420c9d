//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser integrations kept out of page and component code.

pub mod turnstile;
