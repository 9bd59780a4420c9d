//! Toast stack rendered in the corner of every page.

#[cfg(test)]
#[path = "toast_stack_test.rs"]
mod toast_stack_test;

use leptos::prelude::*;

use crate::state::toasts::{ToastEntry, ToastState};

/// CSS class for one toast, keyed by its kind.
pub fn toast_class(entry: &ToastEntry) -> String {
    format!("toast toast--{}", entry.toast.kind.as_str())
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .entries()
                    .iter()
                    .map(|entry| {
                        let id = entry.id;
                        let class = toast_class(entry);
                        let title = entry.toast.title.clone();
                        let description = entry.toast.description.clone();
                        let close = entry.toast.closable.then(|| {
                            view! {
                                <button
                                    class="toast__close"
                                    type="button"
                                    aria-label="Close"
                                    on:click=move |_| toasts.update(|t| {
                                        t.dismiss(id);
                                    })
                                >
                                    "×"
                                </button>
                            }
                        });
                        view! {
                            <div class=class>
                                <p class="toast__title">{title}</p>
                                <p class="toast__description">{description}</p>
                                {close}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
