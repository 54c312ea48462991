use leptos::prelude::*;

/// Labelled text input with an inline validation message.
#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional, into)] error: Signal<Option<String>>,
    #[prop(optional)] placeholder: &'static str,
    /// Renders a textarea
    #[prop(optional)]
    multiline: bool,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let control = if multiline {
        view! {
            <textarea
                id=id
                class="form__textarea"
                rows="3"
                placeholder=placeholder
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    } else {
        view! {
            <input
                type="text"
                id=id
                class="form__input"
                placeholder=placeholder
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            {control}
            {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}

/// Select over (value, label) pairs. The empty option maps to `None`.
#[component]
pub fn SelectField(
    id: &'static str,
    label: &'static str,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<Option<String>>,
    on_change: Callback<Option<String>>,
    #[prop(optional, into)] error: Signal<Option<String>>,
    /// Label of the empty option; no empty option when omitted
    #[prop(optional)]
    empty_label: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select
                id=id
                class="form__select"
                prop:value=move || value.get().unwrap_or_default()
                on:change=move |ev| on_change.run(optional_text(event_target_value(&ev)))
            >
                {empty_label.map(|text| view! { <option value="">{text}</option> })}
                {move || {
                    let current = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(v, text)| {
                            let selected = current.as_deref() == Some(v.as_str());
                            view! { <option value=v selected=selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}

#[component]
pub fn CheckboxField(
    id: &'static str,
    label: &'static str,
    #[prop(into)] checked: Signal<bool>,
    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <div class="form-group form-group--inline">
            <input
                type="checkbox"
                id=id
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <label for=id>{label}</label>
        </div>
    }
}

/// Turns blank input into `None`.
pub fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_text_is_none() {
        assert_eq!(optional_text("   ".into()), None);
        assert_eq!(optional_text("Main st. 1".into()), Some("Main st. 1".into()));
    }
}
