use crate::shared::icons::icon;
use leptos::prelude::*;

/// "3 / 12 (117)"; the record count is shown only when the backend sent it.
pub fn page_label(current_page: u32, total_pages: u32, total_records: Option<u64>) -> String {
    let total = total_pages.max(1);
    let current = current_page.clamp(1, total);
    match total_records {
        Some(records) => format!("{} / {} ({})", current, total, records),
        None => format!("{} / {}", current, total),
    }
}

/// PaginationControls component - 1-based pager with page size select
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Record count, when known
    #[prop(into)]
    total_records: Signal<Option<u64>>,

    #[prop(into)]
    page_size: Signal<u32>,

    on_page_change: Callback<u32>,

    on_page_size_change: Callback<u32>,

    page_size_options: Vec<u32>,
) -> impl IntoView {
    let fallback_size = page_size_options.first().copied().unwrap_or(10);
    let at_first = move || current_page.get() <= 1;
    let at_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1).max(1))
                disabled=at_first
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || page_label(current_page.get(), total_pages.get(), total_records.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=at_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=at_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let size = event_target_value(&ev).parse().unwrap_or(fallback_size);
                    on_page_size_change.run(size);
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_with_and_without_record_count() {
        assert_eq!(page_label(2, 5, Some(48)), "2 / 5 (48)");
        assert_eq!(page_label(1, 3, None), "1 / 3");
    }

    #[test]
    fn empty_result_still_reads_one_of_one() {
        assert_eq!(page_label(1, 0, None), "1 / 1");
        assert_eq!(page_label(9, 4, None), "4 / 4");
    }
}
