use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::prelude::*;

/// Renders the tab once and toggles its visibility, so switching tabs keeps
/// form state and scroll position.
#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let tab_key = StoredValue::new(tab.key.clone());
    let is_active = move || {
        tab_key.with_value(|key| tabs_store.active.with(|a| a.as_deref() == Some(key.as_str())))
    };

    log::debug!("tab page created: '{}'", tab.key);
    on_cleanup(move || {
        tab_key.try_with_value(|key| log::debug!("tab page destroyed: '{}'", key));
    });

    let content = render_tab_content(&tab.key, tabs_store);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab.key
        >
            {content}
        </div>
    }
}
