use contracts::domain::a001_brand::Brand;
use contracts::shared::projection::{flag_label, text_or_placeholder};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_key, detail_tab_label};
use crate::shared::components::data_table::{Column, DataTable, RowAction};
use crate::shared::components::filter_panel::FilterField;
use crate::shared::config::config;
use crate::shared::list_controller::ListController;

pub fn columns() -> Vec<Column<Brand>> {
    vec![
        Column::text("code", "Code", |b: &Brand| b.code.clone()).min_width(100.0),
        Column::text("name", "Name", |b: &Brand| b.name.clone()).min_width(200.0),
        Column::text("description", "Description", |b: &Brand| {
            text_or_placeholder(b.description.as_deref())
        })
        .min_width(250.0),
        Column::text("is_active", "Status", |b: &Brand| {
            flag_label(b.is_active, "Active", "Inactive")
        })
        .badge(|b: &Brand| if b.is_active { "success" } else { "neutral" })
        .min_width(90.0),
    ]
}

pub fn filter_fields() -> Vec<FilterField> {
    vec![FilterField::select(
        "is_active",
        "Status",
        vec![
            ("1".to_string(), "Active".to_string()),
            ("0".to_string(), "Inactive".to_string()),
        ],
    )]
}

#[component]
pub fn BrandList() -> impl IntoView {
    let tabs = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = ListController::<Brand>::for_resource(config().list.default_page_size);

    let open = move |brand: Option<Brand>| {
        let key = detail_key::<Brand>(brand.as_ref().map(|b| &b.id));
        tabs.open_tab(&key, &detail_tab_label::<Brand>(brand.as_ref().map(|b| b.code.as_str())));
    };

    view! {
        <div class="page brand-list">
            <div class="page-header">
                <h2>"Brands"</h2>
            </div>
            <DataTable
                controller=controller
                columns=columns()
                on_add=Callback::new(move |_| open(None))
                on_open=Callback::new(move |b: Brand| open(Some(b)))
                row_actions=vec![RowAction::new("Edit", "edit", Callback::new(move |b: Brand| open(Some(b))))]
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

    #[test]
    fn row_renders_with_placeholders() {
        let brand = Brand {
            id: 1,
            code: "BR-0001".into(),
            name: "Sunrise".into(),
            description: None,
            is_active: false,
        };
        let cells: Vec<String> = columns().iter().map(|c| c.cell(&brand)).collect();
        assert_eq!(cells, vec!["BR-0001", "Sunrise", "-", "Inactive"]);
        assert_eq!(columns()[3].badge_variant(&brand), Some("neutral"));
    }
}
