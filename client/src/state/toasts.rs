//! Toast notification stack.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<ToastState>` from `App`; pages push toasts built by
//! `login::notice::Toast` and `ToastStack` renders and dismisses them.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use login::notice::Toast;

/// Oldest toasts are dropped beyond this many.
pub const MAX_VISIBLE_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastEntry {
    pub id: u64,
    pub toast: Toast,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    next_id: u64,
    entries: Vec<ToastEntry>,
}

impl ToastState {
    /// Add a toast and return the id used to dismiss it.
    pub fn push(&mut self, toast: Toast) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(ToastEntry { id, toast });
        if self.entries.len() > MAX_VISIBLE_TOASTS {
            let overflow = self.entries.len() - MAX_VISIBLE_TOASTS;
            self.entries.drain(..overflow);
        }
        id
    }

    /// Remove a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn entries(&self) -> &[ToastEntry] {
        &self.entries
    }
}
