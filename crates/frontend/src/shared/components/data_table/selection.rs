//! Row selection checkboxes.
//!
//! The header checkbox has three states: nothing on the page selected, some
//! rows selected (indeterminate), all rows selected.

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Unchecked,
    Indeterminate,
    Checked,
}

pub fn selection_state(page_ids: &[String], selected: &HashSet<String>) -> SelectionState {
    if page_ids.is_empty() {
        return SelectionState::Unchecked;
    }
    let count = page_ids.iter().filter(|id| selected.contains(*id)).count();
    if count == 0 {
        SelectionState::Unchecked
    } else if count == page_ids.len() {
        SelectionState::Checked
    } else {
        SelectionState::Indeterminate
    }
}

#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)] state: Signal<SelectionState>,
    /// true = select the whole page, false = clear it
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // `indeterminate` is a DOM property only
    Effect::new(move |_| {
        let indeterminate = state.get() == SelectionState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == SelectionState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

#[component]
pub fn TableCellCheckbox(
    #[prop(into)] item_id: String,
    #[prop(into)] selected: Signal<HashSet<String>>,
    on_change: Callback<(String, bool)>,
) -> impl IntoView {
    let id_for_checked = item_id.clone();

    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || selected.get().contains(&id_for_checked)
                on:change=move |ev| on_change.run((item_id.clone(), event_target_checked(&ev)))
            />
        </TableCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn tri_state_follows_current_page() {
        let page = ids(&["1", "2", "3"]);
        let mut selected: HashSet<String> = HashSet::new();
        assert_eq!(selection_state(&page, &selected), SelectionState::Unchecked);

        selected.insert("2".into());
        selected.insert("99".into());
        assert_eq!(selection_state(&page, &selected), SelectionState::Indeterminate);

        selected.insert("1".into());
        selected.insert("3".into());
        assert_eq!(selection_state(&page, &selected), SelectionState::Checked);
    }

    #[test]
    fn empty_page_is_unchecked() {
        let selected: HashSet<String> = ids(&["1"]).into_iter().collect();
        assert_eq!(selection_state(&[], &selected), SelectionState::Unchecked);
    }
}
