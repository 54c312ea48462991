use contracts::domain::a005_sales_order::{SalesOrder, SalesOrderFilter};
use contracts::enums::OrderStatus;
use contracts::shared::projection::{code_name, date_or_placeholder, number_or_placeholder};
use leptos::prelude::*;

use super::details::status_variant;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{detail_key, detail_tab_label};
use crate::shared::components::data_table::{Align, Column, DataTable, RowAction};
use crate::shared::components::filter_panel::{FilterField, FilterInputs};
use crate::shared::config::config;
use crate::shared::date_utils::parse_input_date;
use crate::shared::list_controller::ListController;

pub fn columns() -> Vec<Column<SalesOrder>> {
    vec![
        Column::text("order_code", "Order", |o: &SalesOrder| o.order_code.clone()).min_width(110.0),
        Column::text("order_date", "Date", |o: &SalesOrder| {
            date_or_placeholder(o.order_date.as_deref())
        })
        .min_width(100.0),
        Column::text("customer", "Customer", |o: &SalesOrder| code_name(o.customer.as_ref()))
            .min_width(180.0),
        Column::text("warehouse", "Warehouse", |o: &SalesOrder| code_name(o.warehouse.as_ref()))
            .min_width(150.0),
        Column::text("salesman", "Salesman", |o: &SalesOrder| code_name(o.salesman.as_ref()))
            .min_width(140.0),
        Column::text("total_amount", "Total", |o: &SalesOrder| {
            number_or_placeholder(o.total_amount, 2)
        })
        .align(Align::Right)
        .min_width(110.0),
        Column::text("status", "Status", |o: &SalesOrder| OrderStatus::label(&o.status))
            .badge(|o: &SalesOrder| status_variant(o.status()))
            .min_width(100.0),
    ]
}

pub fn filter_fields() -> Vec<FilterField> {
    vec![
        FilterField::select(
            "status",
            "Status",
            OrderStatus::all()
                .into_iter()
                .map(|s| (s.code().to_string(), s.display_name().to_string()))
                .collect(),
        ),
        FilterField::date("date_from", "From"),
        FilterField::date("date_to", "To"),
        FilterField::text("warehouse_id", "Warehouse id"),
    ]
}

/// Unparseable dates and unknown statuses are dropped.
pub fn filter_from_inputs(inputs: &FilterInputs) -> SalesOrderFilter {
    let get = |key: &str| inputs.get(key).map(String::as_str).unwrap_or_default();
    SalesOrderFilter {
        status: OrderStatus::from_code(get("status")),
        date_from: parse_input_date(get("date_from")),
        date_to: parse_input_date(get("date_to")),
        warehouse_id: Some(get("warehouse_id").to_string()),
    }
    .normalized()
}

#[component]
pub fn SalesOrderList() -> impl IntoView {
    let tabs = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = ListController::<SalesOrder>::for_resource(config().list.default_page_size);

    let open = move |order: SalesOrder| {
        tabs.open_tab(
            &detail_key::<SalesOrder>(Some(&order.id)),
            &detail_tab_label::<SalesOrder>(Some(&order.order_code)),
        );
    };

    view! {
        <div class="page sales-order-list">
            <div class="page-header">
                <h2>"Sales orders"</h2>
            </div>
            <DataTable
                controller=controller
                columns=columns()
                on_open=Callback::new(open)
                row_actions=vec![RowAction::new("View", "eye", Callback::new(open))]
                exportable=true
                searchable=true
                filter_fields=filter_fields()
                on_filter=Callback::new(move |inputs: FilterInputs| {
                    controller.filter(filter_from_inputs(&inputs).to_filters())
                })
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn inputs_become_normalized_filter() {
        let inputs: FilterInputs = [
            ("status", "Cancelled"),
            ("date_from", "2024-07-31"),
            ("date_to", "2024-07-01"),
            ("warehouse_id", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let filter = filter_from_inputs(&inputs);
        assert_eq!(filter.status, Some(OrderStatus::Cancelled));
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(filter.date_to, NaiveDate::from_ymd_opt(2024, 7, 31));
        assert!(!filter.to_filters().contains_key("warehouse_id"));
    }

    #[test]
    fn garbage_inputs_give_empty_filter() {
        let inputs: FilterInputs = [("status", "whatever"), ("date_from", "31.07.2024")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(filter_from_inputs(&inputs).is_empty());
    }
}
