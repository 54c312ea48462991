use super::view_model::WarehouseDetailsViewModel;
use crate::shared::components::code_field::CodeField;
use crate::shared::components::form_field::{CheckboxField, SelectField, TextField};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn WarehouseDetails(
    id: Option<i64>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = WarehouseDetailsViewModel::new(id);
    let state = vm.state;

    view! {
        <div class="details-container warehouse-details">
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
                />
                <TextField
                    id="address"
                    label="Address"
                    value=Signal::derive(move || {
                        state.form.with(|f| f.address.clone().unwrap_or_default())
                    })
                    on_input=Callback::new(move |v| vm.set_address(v))
                    error=Signal::derive(move || state.field_error("address"))
                />
                <SelectField
                    id="region_id"
                    label="Region"
                    options=Signal::derive(move || vm.region_options())
                    value=Signal::derive(move || state.form.with(|f| f.region_id.clone()))
                    on_change=Callback::new(move |v| vm.set_region(v))
                    empty_label="Not set"
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
