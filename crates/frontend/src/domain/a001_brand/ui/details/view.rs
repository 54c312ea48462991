use super::view_model::BrandDetailsViewModel;
use crate::shared::components::code_field::CodeField;
use crate::shared::components::form_field::{CheckboxField, TextField};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn BrandDetails(
    id: Option<i64>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = BrandDetailsViewModel::new(id);
    let state = vm.state;

    view! {
        <div class="details-container brand-details">
            <div class="details-header">
                <h3>{vm.title()}</h3>
            </div>

            {move || state.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show when=move || state.loading.get()>
                <Spinner />
            </Show>

            <div class="details-form">
                <CodeField
                    state=state.code
                    error=Signal::derive(move || state.field_error("code"))
                />
                <TextField
                    id="name"
                    label="Name"
                    value=Signal::derive(move || state.form.with(|f| f.name.clone()))
                    on_input=Callback::new(move |v| vm.set_name(v))
                    error=Signal::derive(move || state.field_error("name"))
                    placeholder="Brand name"
                />
                <TextField
                    id="description"
                    label="Description"
                    multiline=true
                    value=Signal::derive(move || {
                        state.form.with(|f| f.description.clone().unwrap_or_default())
                    })
                    on_input=Callback::new(move |v| vm.set_description(v))
                    error=Signal::derive(move || state.field_error("description"))
                />
                <CheckboxField
                    id="is_active"
                    label="Active"
                    checked=Signal::derive(move || state.form.with(|f| f.is_active))
                    on_change=Callback::new(move |v| vm.set_active(v))
                />
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save_command(on_saved)
                    disabled=state.saving
                >
                    {icon("save")}
                    {if state.is_edit_mode() { " Save" } else { " Create" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("x")}
                    " Cancel"
                </Button>
            </div>
        </div>
    }
}
