//! # client
//!
//! Leptos + WASM sign-in page for Arvon.
//!
//! Form state and the submission state machine live in the `login` crate;
//! this crate renders them, talks to the auth service with `gloo-net`, and
//! mounts the Turnstile challenge widget for the lifetime of the page.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: render the app into `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
