use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Decides whether a settled input value should be sent, given the search
/// the table is currently showing (`None` when it lists or filters).
pub fn should_send(value: &str, active_search: Option<&str>) -> Option<String> {
    let trimmed = value.trim();
    match active_search {
        Some(active) if active == trimmed => None,
        None if trimmed.is_empty() => None,
        _ => Some(trimmed.to_string()),
    }
}

/// Search box that reports its text after `debounce_ms` of quiet.
/// An empty box reports `""` so the page can fall back to the plain list.
#[component]
pub fn SearchInput(
    on_search: Callback<String>,
    /// Search text of the table's current query
    #[prop(into)]
    active: Signal<Option<String>>,
    debounce_ms: u32,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let value = RwSignal::new(String::new());
    let generation = StoredValue::new(0u64);
    let send_now = move |text: String| {
        if let Some(text) = active.with_untracked(|a| should_send(&text, a.as_deref())) {
            on_search.run(text);
        }
    };

    Effect::new(move |prev: Option<()>| {
        let text = value.get();
        if prev.is_none() {
            return;
        }
        generation.update_value(|g| *g += 1);
        let current = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(debounce_ms).await;
            if generation.try_get_value() == Some(current) {
                send_now(text);
            }
        });
    });

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        value.set(String::new());
        send_now(String::new());
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="search"
                class="search-input__field"
                placeholder=placeholder.unwrap_or_else(|| "Search...".to_string())
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        generation.update_value(|g| *g += 1);
                        send_now(value.get_untracked());
                    }
                }
            />
            <Show when=move || !value.get().is_empty()>
                <button class="search-input__clear" title="Clear" on:click=clear>
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::pagination::{FilterValue, Filters, ListQuery, PageRequest};

    #[test]
    fn repeated_text_is_not_resent() {
        assert_eq!(should_send("acme", Some("acme")), None);
        assert_eq!(should_send(" acme ", Some("acme")), None);
        assert_eq!(should_send("acme co", Some("acme")), Some("acme co".into()));
    }

    #[test]
    fn clearing_after_a_search_sends_empty_text() {
        assert_eq!(should_send("", Some("acme")), Some(String::new()));
        assert_eq!(should_send("  ", None), None);
    }

    #[test]
    fn same_text_is_resent_after_a_filter_replaced_the_search() {
        let request = PageRequest::first(20);
        let searched = ListQuery::search(request, "acme");
        assert_eq!(should_send("acme", searched.search_text()), None);

        let filters = Filters::from([("status".to_string(), FilterValue::Text("active".into()))]);
        let filtered = ListQuery::filter(request, filters);
        assert_eq!(filtered.search_text(), None);
        assert_eq!(should_send("acme", filtered.search_text()), Some("acme".into()));
    }
}
