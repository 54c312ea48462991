//! Options for reference selects (regions, warehouses).

use contracts::shared::api_envelope::ApiError;
use contracts::shared::pagination::{ListQuery, PageRequest};
use contracts::shared::projection::{code_name, NestedRef};
use serde_json::Value;

use super::api_client::get_json;
use super::api_utils::with_query;

const LOOKUP_LIMIT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOption {
    pub id: String,
    pub label: String,
}

impl LookupOption {
    /// Rows without an id cannot be selected.
    pub fn from_row(row: &Value) -> Option<Self> {
        let reference = NestedRef::from_value(row)?;
        let id = reference.id()?.to_string();
        Some(Self {
            id,
            label: code_name(Some(&reference)),
        })
    }
}

pub fn as_pairs(options: &[LookupOption]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|o| (o.id.clone(), o.label.clone()))
        .collect()
}

/// First page of a reference collection, e.g. `/api/regions`.
pub async fn fetch_lookup(path: &str) -> Result<Vec<LookupOption>, ApiError> {
    let request = PageRequest::first(LOOKUP_LIMIT);
    let url = with_query(path, &ListQuery::list(request).to_query_pairs());
    let rows = get_json(&url).await?.into_list::<Value>(request)?;
    Ok(rows.data.iter().filter_map(LookupOption::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_ids_and_labels() {
        let option = LookupOption::from_row(&json!({"id": 4, "code": "NW", "name": "North-West"})).unwrap();
        assert_eq!(option.id, "4");
        assert_eq!(option.label, "NW - North-West");
    }

    #[test]
    fn rows_without_id_are_skipped() {
        assert_eq!(LookupOption::from_row(&json!({"name": "Orphan"})), None);
        assert_eq!(LookupOption::from_row(&Value::Null), None);
    }
}
