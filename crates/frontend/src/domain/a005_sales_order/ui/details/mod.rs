//! Read-only order card; orders are edited in the field app.

use contracts::domain::a005_sales_order::SalesOrder;
use contracts::enums::OrderStatus;
use contracts::shared::projection::{code_name, date_or_placeholder, number_or_placeholder};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::rest_resource::RestResource;

/// Label/value pairs shown in the card.
pub fn summary_rows(order: &SalesOrder) -> Vec<(&'static str, String)> {
    vec![
        ("Order", order.order_code.clone()),
        ("Date", date_or_placeholder(order.order_date.as_deref())),
        ("Customer", code_name(order.customer.as_ref())),
        ("Warehouse", code_name(order.warehouse.as_ref())),
        ("Salesman", code_name(order.salesman.as_ref())),
        ("Total", number_or_placeholder(order.total_amount, 2)),
    ]
}

pub fn status_variant(status: Option<OrderStatus>) -> &'static str {
    match status {
        Some(OrderStatus::Pending) => "warning",
        Some(OrderStatus::Approved) | Some(OrderStatus::Dispatched) => "primary",
        Some(OrderStatus::Delivered) => "success",
        Some(OrderStatus::Cancelled) => "error",
        None => "neutral",
    }
}

#[component]
pub fn SalesOrderDetails(id: i64, on_close: Callback<()>) -> impl IntoView {
    let order = RwSignal::new(None::<SalesOrder>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(true);

    spawn_local(async move {
        match RestResource::<SalesOrder>::new().get_by_id(&id).await {
            Ok(loaded) => {
                order.try_set(Some(loaded));
            }
            Err(err) => {
                log::error!("load sales order {} failed: {}", id, err);
                error.try_set(Some(err.user_message()));
            }
        }
        loading.try_set(false);
    });

    view! {
        <div class="details-container sales-order-details">
            <div class="details-header">
                <h3>"Sales order"</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || order.get().map(|o| {
                let status = o.status();
                let status_text = OrderStatus::label(&o.status);
                view! {
                    <dl class="details-summary">
                        {summary_rows(&o)
                            .into_iter()
                            .map(|(label, value)| view! {
                                <dt>{label}</dt>
                                <dd>{value}</dd>
                            })
                            .collect_view()}
                        <dt>"Status"</dt>
                        <dd>
                            <Badge variant=status_variant(status).to_string()>{status_text}</Badge>
                        </dd>
                    </dl>
                }
            })}

            <div class="details-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    {icon("x")}
                    " Close"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_tolerates_missing_references() {
        let order: SalesOrder = serde_json::from_value(json!({
            "id": 7,
            "order_code": "SO-0007",
            "order_date": "2024-05-02",
            "customer": null,
            "warehouse": {"code": "WH-1"},
            "total_amount": null,
            "status": "delivered"
        }))
        .unwrap();
        let rows = summary_rows(&order);
        assert_eq!(rows[2], ("Customer", "-".to_string()));
        assert_eq!(rows[3], ("Warehouse", "WH-1".to_string()));
        assert_eq!(rows[5], ("Total", "-".to_string()));
        assert_eq!(status_variant(order.status()), "success");
    }
}
