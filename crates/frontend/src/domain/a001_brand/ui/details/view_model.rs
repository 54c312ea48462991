use contracts::domain::a001_brand::BrandDto;
use leptos::prelude::*;

use crate::shared::components::form_field::optional_text;
use crate::shared::details::DetailsState;

/// ViewModel for the Brand details form
#[derive(Clone, Copy)]
pub struct BrandDetailsViewModel {
    pub state: DetailsState<BrandDto>,
}

impl BrandDetailsViewModel {
    pub fn new(id: Option<i64>) -> Self {
        Self {
            state: DetailsState::new(id),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.state.is_edit_mode() {
            "Edit brand"
        } else {
            "New brand"
        }
    }

    pub fn set_name(&self, value: String) {
        self.state.form.update(|f| f.name = value);
    }

    pub fn set_description(&self, value: String) {
        self.state.form.update(|f| f.description = optional_text(value));
    }

    pub fn set_active(&self, value: bool) {
        self.state.form.update(|f| f.is_active = value);
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        self.state.save(on_saved);
    }
}
