use leptos::prelude::*;

use super::context::use_auth;

/// Renders `children` for a signed-in user, `fallback` otherwise.
#[component]
pub fn RequireAuth(#[prop(into)] fallback: ViewFn, children: ChildrenFn) -> impl IntoView {
    let auth_state = use_auth();

    view! {
        <Show when=move || auth_state.with(|s| s.is_authenticated()) fallback=fallback>
            {children()}
        </Show>
    }
}
