//! Reusable UI components.
//!
//! ARCHITECTURE
//! ============
//! Components read shared state from context and keep rendering concerns out
//! of `pages`.

pub mod toast_stack;
