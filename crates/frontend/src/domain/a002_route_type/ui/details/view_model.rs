use contracts::domain::a002_route_type::RouteTypeDto;
use leptos::prelude::*;

use crate::shared::components::form_field::optional_text;
use crate::shared::details::DetailsState;

#[derive(Clone, Copy)]
pub struct RouteTypeDetailsViewModel {
    pub state: DetailsState<RouteTypeDto>,
}

impl RouteTypeDetailsViewModel {
    pub fn new(id: Option<i64>) -> Self {
        Self {
            state: DetailsState::new(id),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.state.is_edit_mode() {
            "Edit route type"
        } else {
            "New route type"
        }
    }

    pub fn set_name(&self, value: String) {
        self.state.form.update(|f| f.name = value);
    }

    pub fn set_description(&self, value: String) {
        self.state.form.update(|f| f.description = optional_text(value));
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        self.state.save(on_saved);
    }
}
