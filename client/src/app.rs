//! Layout composition root: metadata, toast context, and routing.

use leptos::prelude::*;
use leptos_meta::{Meta, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::toast_stack::ToastStack;
use crate::pages::login::LoginPage;
use crate::state::toasts::ToastState;

pub const APP_TITLE: &str = "Arvon";
pub const APP_DESCRIPTION: &str = "The best way to communicate with friends with efficiency";

/// Root application component.
///
/// Provides the toast stack context and routes `/` to the sign-in page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    provide_context(toasts);

    view! {
        <Title text=APP_TITLE/>
        <Meta name="description" content=APP_DESCRIPTION/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/login"/> }/>
            </Routes>
        </Router>
        <ToastStack/>
    }
}
