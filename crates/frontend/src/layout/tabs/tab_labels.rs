//! Tab keys and titles.
//!
//! List tabs are keyed `{entity_index}_{collection}` ("a001_brands"), detail
//! tabs `{list key}_detail_{id}` with `new` for an add form.

use contracts::domain::a001_brand::Brand;
use contracts::domain::a002_route_type::RouteType;
use contracts::domain::a003_warehouse::Warehouse;
use contracts::domain::a004_distributor::Distributor;
use contracts::domain::a005_sales_order::SalesOrder;
use contracts::domain::a006_claim::Claim;
use contracts::domain::common::{RecordId, Resource};

const NEW: &str = "new";

pub fn list_key<T: Resource>() -> String {
    format!("{}_{}", T::entity_index(), T::collection_name())
}

pub fn detail_key<T: Resource>(id: Option<&T::Id>) -> String {
    let suffix = id.map(RecordId::as_string).unwrap_or_else(|| NEW.to_string());
    format!("{}_detail_{}", list_key::<T>(), suffix)
}

/// `None` for keys of other tabs, `Some(None)` for the add form.
pub fn parse_detail_key<T: Resource>(key: &str) -> Option<Option<T::Id>> {
    let rest = key.strip_prefix(&format!("{}_detail_", list_key::<T>()))?;
    if rest == NEW {
        return Some(None);
    }
    T::Id::from_string(rest).ok().map(Some)
}

pub fn detail_tab_label<T: Resource>(code: Option<&str>) -> String {
    match code {
        Some(code) if !code.trim().is_empty() => format!("{} {}", T::element_name(), code),
        _ => format!("New {}", T::element_name().to_lowercase()),
    }
}

fn label_for<T: Resource>(key: &str) -> Option<String> {
    if key == list_key::<T>() {
        return Some(T::list_name().to_string());
    }
    match parse_detail_key::<T>(key)? {
        None => Some(detail_tab_label::<T>(None)),
        Some(id) => Some(format!("{} #{}", T::element_name(), id.as_string())),
    }
}

/// Title for a key restored from the URL; falls back to the key itself.
pub fn tab_label_for_key(key: &str) -> String {
    label_for::<Brand>(key)
        .or_else(|| label_for::<RouteType>(key))
        .or_else(|| label_for::<Warehouse>(key))
        .or_else(|| label_for::<Distributor>(key))
        .or_else(|| label_for::<SalesOrder>(key))
        .or_else(|| label_for::<Claim>(key))
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_keys_round_trip() {
        assert_eq!(list_key::<Brand>(), "a001_brands");
        let key = detail_key::<Brand>(Some(&42));
        assert_eq!(key, "a001_brands_detail_42");
        assert_eq!(parse_detail_key::<Brand>(&key), Some(Some(42)));
        assert_eq!(parse_detail_key::<Brand>("a001_brands_detail_new"), Some(None));
        assert_eq!(parse_detail_key::<Brand>("a003_warehouses_detail_1"), None);
        assert_eq!(parse_detail_key::<Brand>("a001_brands_detail_abc"), None);
    }

    #[test]
    fn labels() {
        assert_eq!(tab_label_for_key("a006_claims"), "Claims");
        assert_eq!(tab_label_for_key("a002_route-types_detail_new"), "New route type");
        assert_eq!(tab_label_for_key("a004_distributors_detail_7"), "Distributor #7");
        assert_eq!(tab_label_for_key("unknown"), "unknown");
        assert_eq!(detail_tab_label::<Warehouse>(Some("WH-01")), "Warehouse WH-01");
    }
}
