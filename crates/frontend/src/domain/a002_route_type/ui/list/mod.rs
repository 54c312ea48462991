use contracts::domain::a002_route_type::RouteType;
use contracts::shared::projection::text_or_placeholder;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_key, detail_tab_label};
use crate::shared::components::data_table::{Column, DataTable, RowAction};
use crate::shared::config::config;
use crate::shared::list_controller::ListController;

pub fn columns() -> Vec<Column<RouteType>> {
    vec![
        Column::text("code", "Code", |r: &RouteType| r.code.clone()).min_width(100.0),
        Column::text("name", "Name", |r: &RouteType| r.name.clone()).min_width(200.0),
        Column::text("description", "Description", |r: &RouteType| {
            text_or_placeholder(r.description.as_deref())
        })
        .min_width(300.0),
    ]
}

#[component]
pub fn RouteTypeList() -> impl IntoView {
    let tabs = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = ListController::<RouteType>::for_resource(config().list.default_page_size);

    let open = move |row: Option<RouteType>| {
        let key = detail_key::<RouteType>(row.as_ref().map(|r| &r.id));
        tabs.open_tab(
            &key,
            &detail_tab_label::<RouteType>(row.as_ref().map(|r| r.code.as_str())),
        );
    };

    view! {
        <div class="page route-type-list">
            <div class="page-header">
                <h2>"Route types"</h2>
            </div>
            <DataTable
                controller=controller
                columns=columns()
                on_add=Callback::new(move |_| open(None))
                on_open=Callback::new(move |r: RouteType| open(Some(r)))
                row_actions=vec![RowAction::new("Edit", "edit", Callback::new(move |r: RouteType| open(Some(r))))]
                deletable=true
                searchable=true
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_is_a_placeholder() {
        let row = RouteType {
            id: 2,
            code: "RT-02".into(),
            name: "Wholesale drop".into(),
            description: Some("  ".into()),
        };
        assert_eq!(columns()[2].cell(&row), "-");
    }
}
