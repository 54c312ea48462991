use contracts::domain::a003_warehouse::WarehouseDto;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model::fetch_regions;
use crate::shared::components::form_field::optional_text;
use crate::shared::details::DetailsState;
use crate::shared::lookups::{as_pairs, LookupOption};

#[derive(Clone, Copy)]
pub struct WarehouseDetailsViewModel {
    pub state: DetailsState<WarehouseDto>,
    pub regions: RwSignal<Vec<LookupOption>>,
}

impl WarehouseDetailsViewModel {
    pub fn new(id: Option<i64>) -> Self {
        let vm = Self {
            state: DetailsState::new(id),
            regions: RwSignal::new(Vec::new()),
        };
        vm.load_regions();
        vm
    }

    fn load_regions(&self) {
        let regions = self.regions;
        spawn_local(async move {
            match fetch_regions().await {
                Ok(options) => {
                    regions.try_set(options);
                }
                Err(err) => log::warn!("region lookup failed: {}", err),
            }
        });
    }

    pub fn region_options(&self) -> Vec<(String, String)> {
        self.regions.with(|r| as_pairs(r))
    }

    pub fn title(&self) -> &'static str {
        if self.state.is_edit_mode() {
            "Edit warehouse"
        } else {
            "New warehouse"
        }
    }

    pub fn set_name(&self, value: String) {
        self.state.form.update(|f| f.name = value);
    }

    pub fn set_address(&self, value: String) {
        self.state.form.update(|f| f.address = optional_text(value));
    }

    pub fn set_region(&self, value: Option<String>) {
        self.state.form.update(|f| f.region_id = value);
    }

    pub fn set_active(&self, value: bool) {
        self.state.form.update(|f| f.is_active = value);
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        self.state.save(on_saved);
    }
}
