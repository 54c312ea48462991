use serde::{Deserialize, Serialize};

use crate::domain::common::Resource;
use crate::shared::code_reservation::ModelName;
use crate::shared::projection::{
    default_active, deserialize_active_flag, deserialize_nested_ref, NestedRef,
};
use crate::shared::validation::FieldErrors;

pub const WAREHOUSE_MODEL: ModelName = ModelName::new("warehouse");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nested_ref")]
    pub region: Option<NestedRef>,
    #[serde(default = "default_active", deserialize_with = "deserialize_active_flag")]
    pub is_active: bool,
}

impl Resource for Warehouse {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn entity_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "warehouses"
    }

    fn element_name() -> &'static str {
        "Warehouse"
    }

    fn list_name() -> &'static str {
        "Warehouses"
    }

    fn model_name() -> Option<ModelName> {
        Some(WAREHOUSE_MODEL)
    }
}

/// Region is sent by id; the list endpoint returns it expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    pub is_active: bool,
}

impl Default for WarehouseDto {
    fn default() -> Self {
        Self {
            id: None,
            code: String::new(),
            name: String::new(),
            address: None,
            region_id: None,
            is_active: true,
        }
    }
}

impl WarehouseDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors
            .require("name", "Name", &self.name)
            .max_len("name", "Name", &self.name, 100)
            .max_len("code", "Code", &self.code, 30)
            .max_len("address", "Address", self.address.as_deref().unwrap_or_default(), 255);
        errors.into_result()
    }
}

impl From<&Warehouse> for WarehouseDto {
    fn from(warehouse: &Warehouse) -> Self {
        Self {
            id: Some(warehouse.id),
            code: warehouse.code.clone(),
            name: warehouse.name.clone(),
            address: warehouse.address.clone(),
            region_id: warehouse
                .region
                .as_ref()
                .and_then(NestedRef::id)
                .map(str::to_string),
            is_active: warehouse.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::projection::code_name;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Warehouse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn region_cell_survives_every_backend_shape() {
        let base = json!({ "id": 1, "code": "WH-1", "name": "Central" });

        assert_eq!(code_name(decode(base.clone()).region.as_ref()), "-");

        let mut null = base.clone();
        null["region"] = json!(null);
        assert_eq!(code_name(decode(null).region.as_ref()), "-");

        let mut empty = base.clone();
        empty["region"] = json!({});
        assert_eq!(code_name(decode(empty).region.as_ref()), "-");

        let mut code_only = base.clone();
        code_only["region"] = json!({ "code": "R1" });
        assert_eq!(code_name(decode(code_only).region.as_ref()), "R1");

        let mut full = base;
        full["region"] = json!({ "id": 4, "code": "R1", "name": "North" });
        let warehouse = decode(full);
        assert_eq!(code_name(warehouse.region.as_ref()), "R1 - North");
        assert_eq!(WarehouseDto::from(&warehouse).region_id.as_deref(), Some("4"));
    }

    #[test]
    fn address_length_is_checked() {
        let dto = WarehouseDto {
            name: "Central".into(),
            address: Some("a".repeat(256)),
            ..WarehouseDto::default()
        };
        assert!(dto.validate().unwrap_err().get("address").is_some());
    }
}
