pub mod tab_bar;

use leptos::prelude::*;

pub use tab_bar::TabBar;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            {children()}
        </div>
    }
}
