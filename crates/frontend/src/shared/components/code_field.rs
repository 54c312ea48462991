use contracts::shared::code_reservation::{CodeEntryMode, FormMode};
use leptos::prelude::*;
use thaw::*;

use crate::shared::details::CodeFieldState;

/// Business code input. Read-only in edit mode; in add mode the switch picks
/// between the reserved code and a hand-typed one.
#[component]
pub fn CodeField(
    state: CodeFieldState,
    #[prop(optional, into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let manual_on = RwSignal::new(state.entry.get_untracked() == CodeEntryMode::Manual);

    // reservation failure flips the field to manual
    Effect::new(move |_| {
        let manual = state.entry.get() == CodeEntryMode::Manual;
        if manual_on.get_untracked() != manual {
            manual_on.set(manual);
        }
    });
    Effect::new(move |_| {
        let entry = if manual_on.get() {
            CodeEntryMode::Manual
        } else {
            CodeEntryMode::Auto
        };
        if state.entry.get_untracked() != entry {
            state.set_entry(entry);
        }
    });

    view! {
        <div class="form-group">
            <label for="code">"Code"</label>
            <div class="code-field">
                <input
                    type="text"
                    id="code"
                    class="form__input"
                    prop:value=move || state.display()
                    disabled=move || !state.is_editable()
                    on:input=move |ev| state.manual.set(event_target_value(&ev))
                    placeholder="Code"
                />
                {(state.mode == FormMode::Add).then(|| view! {
                    <Switch checked=manual_on label="Enter manually" />
                })}
            </div>
            {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}
