use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::Resource;
use crate::enums::OrderStatus;
use crate::shared::pagination::{FilterValue, Filters};
use crate::shared::projection::{deserialize_lenient_f64, deserialize_nested_ref, NestedRef};

/// Orders are captured by field agents; the dashboard only browses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: i64,
    #[serde(alias = "code")]
    pub order_code: String,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nested_ref")]
    pub customer: Option<NestedRef>,
    #[serde(default, deserialize_with = "deserialize_nested_ref")]
    pub warehouse: Option<NestedRef>,
    #[serde(default, deserialize_with = "deserialize_nested_ref")]
    pub salesman: Option<NestedRef>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: String,
}

impl SalesOrder {
    pub fn status(&self) -> Option<OrderStatus> {
        OrderStatus::from_code(&self.status)
    }
}

impl Resource for SalesOrder {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn code(&self) -> &str {
        &self.order_code
    }

    fn entity_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "sales-orders"
    }

    fn element_name() -> &'static str {
        "Sales order"
    }

    fn list_name() -> &'static str {
        "Sales orders"
    }
}

/// Filter panel state for the order list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesOrderFilter {
    pub status: Option<OrderStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub warehouse_id: Option<String>,
}

impl SalesOrderFilter {
    pub fn is_empty(&self) -> bool {
        self.to_filters().is_empty()
    }

    pub fn to_filters(&self) -> Filters {
        let mut filters = Filters::new();
        if let Some(status) = self.status {
            filters.insert("status".into(), FilterValue::Text(status.code().into()));
        }
        if let Some(from) = self.date_from {
            filters.insert("date_from".into(), FilterValue::Text(from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            filters.insert("date_to".into(), FilterValue::Text(to.format("%Y-%m-%d").to_string()));
        }
        if let Some(id) = self.warehouse_id.as_deref().filter(|s| !s.trim().is_empty()) {
            filters.insert("warehouse_id".into(), FilterValue::Text(id.trim().into()));
        }
        filters
    }

    /// A reversed range is a user slip; swap it rather than query nothing.
    pub fn normalized(mut self) -> Self {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                self.date_from = Some(to);
                self.date_to = Some(from);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::projection::{code_name, number_or_placeholder};
    use serde_json::json;

    #[test]
    fn decodes_sparse_row() {
        let order: SalesOrder = serde_json::from_value(json!({
            "id": 1,
            "code": "SO-1",
            "total_amount": "1500.5",
            "salesman": { "name": "J. Doe" },
            "status": "shipped"
        }))
        .unwrap();
        assert_eq!(order.order_code, "SO-1");
        assert_eq!(order.status(), Some(OrderStatus::Dispatched));
        assert_eq!(code_name(order.customer.as_ref()), "-");
        assert_eq!(code_name(order.salesman.as_ref()), "J. Doe");
        assert_eq!(number_or_placeholder(order.total_amount, 2), "1,500.50");
    }

    #[test]
    fn filter_to_query_and_range_swap() {
        let filter = SalesOrderFilter {
            status: Some(OrderStatus::Pending),
            date_from: NaiveDate::from_ymd_opt(2024, 6, 30),
            date_to: NaiveDate::from_ymd_opt(2024, 6, 1),
            warehouse_id: Some(" ".into()),
        }
        .normalized();
        let filters = filter.to_filters();
        assert_eq!(filters.get("status"), Some(&FilterValue::Text("pending".into())));
        assert_eq!(filters.get("date_from"), Some(&FilterValue::Text("2024-06-01".into())));
        assert_eq!(filters.get("date_to"), Some(&FilterValue::Text("2024-06-30".into())));
        assert!(!filters.contains_key("warehouse_id"));
        assert!(SalesOrderFilter::default().is_empty());
    }
}
