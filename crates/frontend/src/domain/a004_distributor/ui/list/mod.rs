use contracts::domain::a004_distributor::Distributor;
use contracts::enums::RecordStatus;
use contracts::shared::projection::{code_name, name_only, render_cell, text_or_placeholder};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_key, detail_tab_label};
use crate::shared::components::data_table::{Column, DataTable, RowAction};
use crate::shared::components::filter_panel::FilterField;
use crate::shared::config::config;
use crate::shared::list_controller::ListController;

fn status_text(d: &Distributor) -> String {
    match d.status() {
        Some(status) => status.display_name().to_string(),
        None => render_cell(Some(d.status.clone())),
    }
}

fn status_variant(d: &Distributor) -> &'static str {
    match d.status() {
        Some(RecordStatus::Active) => "success",
        Some(RecordStatus::Inactive) => "neutral",
        None => "warning",
    }
}

pub fn columns() -> Vec<Column<Distributor>> {
    vec![
        Column::text("code", "Code", |d: &Distributor| d.code.clone()).min_width(100.0),
        Column::text("name", "Name", |d: &Distributor| d.name.clone()).min_width(180.0),
        Column::text("contact_person", "Contact", |d: &Distributor| {
            text_or_placeholder(d.contact_person.as_deref())
        })
        .min_width(150.0),
        Column::text("phone", "Phone", |d: &Distributor| text_or_placeholder(d.phone.as_deref()))
            .min_width(120.0),
        Column::text("warehouse", "Warehouse", |d: &Distributor| code_name(d.warehouse.as_ref()))
            .min_width(160.0),
        Column::text("region", "Region", |d: &Distributor| name_only(d.region.as_ref()))
            .min_width(120.0),
        Column::text("status", "Status", status_text)
            .badge(status_variant)
            .min_width(90.0),
    ]
}

pub fn filter_fields() -> Vec<FilterField> {
    vec![
        FilterField::select(
            "status",
            "Status",
            RecordStatus::all()
                .into_iter()
                .map(|s| (s.code().to_string(), s.display_name().to_string()))
                .collect(),
        ),
        FilterField::text("warehouse_id", "Warehouse id"),
    ]
}

#[component]
pub fn DistributorList() -> impl IntoView {
    let tabs = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = ListController::<Distributor>::for_resource(config().list.default_page_size);

    let open = move |row: Option<Distributor>| {
        let key = detail_key::<Distributor>(row.as_ref().map(|d| &d.id));
        tabs.open_tab(
            &key,
            &detail_tab_label::<Distributor>(row.as_ref().map(|d| d.code.as_str())),
        );
    };

    view! {
        <div class="page distributor-list">
            <div class="page-header">
                <h2>"Distributors"</h2>
            </div>
            <DataTable
                controller=controller
                columns=columns()
                on_add=Callback::new(move |_| open(None))
                on_open=Callback::new(move |d: Distributor| open(Some(d)))
                row_actions=vec![RowAction::new("Edit", "edit", Callback::new(move |d: Distributor| open(Some(d))))]
                deletable=true
                exportable=true
                searchable=true
                filter_fields=filter_fields()
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_is_shown_verbatim_with_warning_badge() {
        let d: Distributor = serde_json::from_value(json!({
            "id": 1,
            "code": "DS-1",
            "name": "Delta",
            "warehouse": {"code": "WH-1", "name": "Main"},
            "status": "suspended"
        }))
        .unwrap();
        let cols = columns();
        assert_eq!(cols[4].cell(&d), "WH-1 - Main");
        assert_eq!(cols[5].cell(&d), "-");
        assert_eq!(cols[6].cell(&d), "suspended");
        assert_eq!(cols[6].badge_variant(&d), Some("warning"));
    }

    #[test]
    fn missing_status_renders_placeholder() {
        let d: Distributor =
            serde_json::from_value(json!({"id": 2, "code": "DS-2", "name": "Echo"})).unwrap();
        assert_eq!(columns()[6].cell(&d), "-");
    }
}
