use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[component]
fn TabHeader(tab: TabData) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let key = StoredValue::new(tab.key);
    let is_active = Memo::new(move |_| {
        key.with_value(|k| ctx.active.with(|a| a.as_deref() == Some(k.as_str())))
    });

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        key.with_value(|k| ctx.close_tab(k));
    };

    view! {
        <div
            class="tab"
            class:active=is_active
            on:click=move |_| key.with_value(|k| ctx.activate_tab(k))
        >
            <span class="tab__title">{tab.title}</span>
            <button class="tab-close" title="Close" on:click=on_close>
                {icon("x")}
            </button>
        </div>
    }
}

/// Header strip with one entry per open tab.
#[component]
pub fn TabBar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="tabs-bar">
            <For
                each=move || ctx.opened.get()
                key=|tab| tab.key.clone()
                children=|tab| view! { <TabHeader tab=tab /> }
            />
            <Show when=move || ctx.opened.with(|t| t.len() > 1)>
                <button class="tabs-bar__close-all" title="Close all tabs" on:click=move |_| ctx.close_all()>
                    {icon("x")}
                    " Close all"
                </button>
            </Show>
        </div>
    }
}
