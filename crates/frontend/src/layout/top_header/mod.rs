//! Top bar: sidebar toggle, title, theme selector, current user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::theme::ThemeSelect;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth_state = use_auth();

    let logout = move |_| {
        ctx.close_all();
        spawn_local(do_logout(auth_state));
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Operations Dashboard"</span>
            </div>

            <div class="top-header__actions">
                <ThemeSelect />

                <div class="top-header__user">
                    {icon("user")}
                    <span>{move || auth_state.with(|s| s.display_name())}</span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
