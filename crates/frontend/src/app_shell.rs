//! Auth gate and the main layout behind it.

use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::Sidebar;
use crate::layout::tabs::TabPage;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

/// Sidebar plus the open tabs. Syncs the active tab with `?active=`.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| {
                            view! { <TabPage tab=tab tabs_store=tabs_store /> }
                        }
                    />
                    <Show when=move || tabs_store.opened.with(Vec::is_empty)>
                        <div class="app-main__empty">"Pick a list in the sidebar"</div>
                    </Show>
                }
                .into_any()
            }
        />
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    view! {
        <RequireAuth fallback=|| view! { <LoginPage /> }>
            <MainLayout />
        </RequireAuth>
    }
}
