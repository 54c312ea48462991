use crate::shared::icons::icon;
use contracts::shared::pagination::{FilterValue, Filters};
use leptos::prelude::*;
use std::collections::BTreeMap;

/// Raw input values keyed by filter key, as typed by the user.
pub type FilterInputs = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    Text,
    Date,
    /// (value, label) pairs; an "All" option with an empty value is added.
    Select(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::Text,
        }
    }

    pub fn date(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::Date,
        }
    }

    pub fn select(key: &'static str, label: &'static str, options: Vec<(String, String)>) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::Select(options),
        }
    }

    /// Text shown on the chip for an applied value.
    pub fn tag_text(&self, value: &str) -> String {
        let shown = match &self.kind {
            FilterKind::Select(options) => options
                .iter()
                .find(|(v, _)| v == value)
                .map(|(_, label)| label.as_str())
                .unwrap_or(value),
            _ => value,
        };
        format!("{}: {}", self.label, shown)
    }
}

/// Blank inputs are dropped.
pub fn filters_from_inputs(inputs: &FilterInputs) -> Filters {
    inputs
        .iter()
        .filter_map(|(key, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| (key.clone(), FilterValue::Text(value.to_string())))
        })
        .collect()
}

pub fn active_count(inputs: &FilterInputs) -> usize {
    inputs.values().filter(|v| !v.trim().is_empty()).count()
}

/// FilterPanel component - collapsible filter form with chips for applied values
#[component]
pub fn FilterPanel(
    fields: Vec<FilterField>,

    /// Receives the applied inputs (blank ones included) on Apply, Reset and chip removal
    on_apply: Callback<FilterInputs>,

    #[prop(optional)]
    initially_expanded: bool,
) -> impl IntoView {
    let is_expanded = RwSignal::new(initially_expanded);
    let draft = RwSignal::new(FilterInputs::new());
    let applied = RwSignal::new(FilterInputs::new());
    let fields = StoredValue::new(fields);

    let apply = move || {
        let inputs = draft.get_untracked();
        applied.set(inputs.clone());
        on_apply.run(inputs);
    };

    let reset = move |_| {
        draft.set(FilterInputs::new());
        applied.set(FilterInputs::new());
        on_apply.run(FilterInputs::new());
    };

    let remove = move |key: String| {
        draft.update(|d| {
            d.remove(&key);
        });
        applied.update(|a| {
            a.remove(&key);
        });
        on_apply.run(applied.get_untracked());
    };

    let input_for = move |field: FilterField| {
        let key = field.key;
        let value = move || draft.with(|d| d.get(key).cloned().unwrap_or_default());
        let set = move |v: String| {
            draft.update(|d| {
                d.insert(key.to_string(), v);
            })
        };
        let control = match field.kind {
            FilterKind::Text => view! {
                <input
                    type="text"
                    class="form__input"
                    prop:value=value
                    on:input=move |ev| set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            apply();
                        }
                    }
                />
            }
            .into_any(),
            FilterKind::Date => view! {
                <input
                    type="date"
                    class="form__input"
                    prop:value=value
                    on:change=move |ev| set(event_target_value(&ev))
                />
            }
            .into_any(),
            FilterKind::Select(options) => view! {
                <select
                    class="form__select"
                    prop:value=value
                    on:change=move |ev| set(event_target_value(&ev))
                >
                    <option value="">"All"</option>
                    {options
                        .into_iter()
                        .map(|(v, label)| view! { <option value=v>{label}</option> })
                        .collect_view()}
                </select>
            }
            .into_any(),
        };
        view! {
            <div class="filter-panel__field">
                <label class="form__label">{field.label}</label>
                {control}
            </div>
        }
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=move |_| is_expanded.update(|e| *e = !*e)
                >
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>{icon("chevron-down")}</span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = applied.with(active_count);
                        (count > 0).then(|| view! { <span class="badge badge--primary">{count}</span> })
                    }}
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    <div class="filter-panel__fields">
                        {fields.get_value().into_iter().map(input_for).collect_view()}
                    </div>
                    <div class="filter-panel__actions">
                        <button class="button button--primary" on:click=move |_| apply()>
                            "Apply"
                        </button>
                        <button class="button button--secondary" on:click=reset>
                            "Reset"
                        </button>
                    </div>
                </div>
            </div>

            <div class="filter-panel__tags">
                {move || {
                    applied
                        .get()
                        .into_iter()
                        .filter(|(_, v)| !v.trim().is_empty())
                        .filter_map(|(key, value)| {
                            fields
                                .with_value(|fs| fs.iter().find(|f| f.key == key).cloned())
                                .map(|field| {
                                    let label = field.tag_text(&value);
                                    view! {
                                        <FilterTag
                                            label=label
                                            on_remove=Callback::new(move |_| remove(key.clone()))
                                        />
                                    }
                                })
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

/// FilterTag component - individual filter tag/chip
#[component]
pub fn FilterTag(
    #[prop(into)]
    label: String,

    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, &str)]) -> FilterInputs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn blank_inputs_are_not_filters() {
        let raw = inputs(&[("status", "confirmed"), ("warehouse_id", "  "), ("date_from", "")]);
        let filters = filters_from_inputs(&raw);
        assert_eq!(filters.len(), 1);
        assert_eq!(
            filters.get("status"),
            Some(&FilterValue::Text("confirmed".into()))
        );
        assert_eq!(active_count(&raw), 1);
    }

    #[test]
    fn values_are_trimmed() {
        let filters = filters_from_inputs(&inputs(&[("customer_id", " 42 ")]));
        assert_eq!(filters.get("customer_id"), Some(&FilterValue::Text("42".into())));
    }

    #[test]
    fn select_tag_shows_option_label() {
        let field = FilterField::select(
            "status",
            "Status",
            vec![("in_review".into(), "In review".into())],
        );
        assert_eq!(field.tag_text("in_review"), "Status: In review");
        assert_eq!(field.tag_text("unknown"), "Status: unknown");
        assert_eq!(FilterField::date("date_from", "From").tag_text("2024-01-01"), "From: 2024-01-01");
    }
}
