use contracts::domain::a004_distributor::DistributorDto;
use contracts::enums::RecordStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::components::form_field::optional_text;
use crate::shared::details::DetailsState;
use crate::shared::lookups::{as_pairs, fetch_lookup, LookupOption};

/// Form state plus the warehouse and region options for its selects.
#[derive(Clone, Copy)]
pub struct DistributorDetailsViewModel {
    pub state: DetailsState<DistributorDto>,
    pub warehouses: RwSignal<Vec<LookupOption>>,
    pub regions: RwSignal<Vec<LookupOption>>,
}

impl DistributorDetailsViewModel {
    pub fn new(id: Option<i64>) -> Self {
        let vm = Self {
            state: DetailsState::new(id),
            warehouses: RwSignal::new(Vec::new()),
            regions: RwSignal::new(Vec::new()),
        };
        load_into(vm.warehouses, "/api/warehouses");
        load_into(vm.regions, "/api/regions");
        vm
    }

    pub fn title(&self) -> &'static str {
        if self.state.is_edit_mode() {
            "Edit distributor"
        } else {
            "New distributor"
        }
    }

    pub fn set_name(&self, value: String) {
        self.state.form.update(|f| f.name = value);
    }

    pub fn set_contact_person(&self, value: String) {
        self.state.form.update(|f| f.contact_person = optional_text(value));
    }

    pub fn set_phone(&self, value: String) {
        self.state.form.update(|f| f.phone = optional_text(value));
    }

    pub fn set_email(&self, value: String) {
        self.state.form.update(|f| f.email = optional_text(value));
    }

    pub fn set_warehouse(&self, value: Option<String>) {
        self.state.form.update(|f| f.warehouse_id = value);
    }

    pub fn set_region(&self, value: Option<String>) {
        self.state.form.update(|f| f.region_id = value);
    }

    pub fn set_status(&self, value: Option<String>) {
        let status = value
            .as_deref()
            .and_then(RecordStatus::from_code)
            .unwrap_or(RecordStatus::Active);
        self.state.form.update(|f| f.status = status);
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        self.state.save(on_saved);
    }
}

fn load_into(target: RwSignal<Vec<LookupOption>>, path: &'static str) {
    spawn_local(async move {
        match fetch_lookup(path).await {
            Ok(options) => {
                target.try_set(options);
            }
            Err(err) => log::warn!("lookup {} failed: {}", path, err),
        }
    });
}

pub fn pairs(options: RwSignal<Vec<LookupOption>>) -> Vec<(String, String)> {
    options.with(|o| as_pairs(o))
}
