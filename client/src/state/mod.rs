//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Sign-in form state is `login::LoginForm`; this module only holds what is
//! purely presentational and shared across the page, such as the toast stack.

pub mod toasts;
