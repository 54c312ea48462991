use contracts::domain::a004_distributor::DistributorDto;
use super::model::status_options;
use super::view_model::{pairs, DistributorDetailsViewModel};
use crate::shared::components::code_field::CodeField;
use crate::shared::components::form_field::{SelectField, TextField};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn DistributorDetails(
    id: Option<i64>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = DistributorDetailsViewModel::new(id);
    let state = vm.state;
    let text = move |get: fn(&DistributorDto) -> Option<String>| {
        Signal::derive(move || state.form.with(|f| get(f).unwrap_or_default()))
    };

    view! {
        <div class="details-container distributor-details">
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
                    id="contact_person"
                    label="Contact person"
                    value=text(|f| f.contact_person.clone())
                    on_input=Callback::new(move |v| vm.set_contact_person(v))
                />
                <div class="form-row">
                    <TextField
                        id="phone"
                        label="Phone"
                        value=text(|f| f.phone.clone())
                        on_input=Callback::new(move |v| vm.set_phone(v))
                        error=Signal::derive(move || state.field_error("phone"))
                        placeholder="10-12 digits"
                    />
                    <TextField
                        id="email"
                        label="Email"
                        value=text(|f| f.email.clone())
                        on_input=Callback::new(move |v| vm.set_email(v))
                        error=Signal::derive(move || state.field_error("email"))
                    />
                </div>
                <SelectField
                    id="warehouse_id"
                    label="Warehouse"
                    options=Signal::derive(move || pairs(vm.warehouses))
                    value=Signal::derive(move || state.form.with(|f| f.warehouse_id.clone()))
                    on_change=Callback::new(move |v| vm.set_warehouse(v))
                    error=Signal::derive(move || state.field_error("warehouse_id"))
                    empty_label="Select warehouse"
                />
                <SelectField
                    id="region_id"
                    label="Region"
                    options=Signal::derive(move || pairs(vm.regions))
                    value=Signal::derive(move || state.form.with(|f| f.region_id.clone()))
                    on_change=Callback::new(move |v| vm.set_region(v))
                    empty_label="Not set"
                />
                <SelectField
                    id="status"
                    label="Status"
                    options=Signal::derive(status_options)
                    value=Signal::derive(move || {
                        state.form.with(|f| Some(f.status.code().to_string()))
                    })
                    on_change=Callback::new(move |v| vm.set_status(v))
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
