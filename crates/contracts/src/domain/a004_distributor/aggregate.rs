use serde::{Deserialize, Serialize};

use crate::domain::common::Resource;
use crate::enums::RecordStatus;
use crate::shared::code_reservation::ModelName;
use crate::shared::projection::{deserialize_nested_ref, NestedRef};
use crate::shared::validation::FieldErrors;

pub const DISTRIBUTOR_MODEL: ModelName = ModelName::new("distributor");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distributor {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nested_ref")]
    pub warehouse: Option<NestedRef>,
    #[serde(default, deserialize_with = "deserialize_nested_ref")]
    pub region: Option<NestedRef>,
    #[serde(default)]
    pub status: String,
}

impl Distributor {
    pub fn status(&self) -> Option<RecordStatus> {
        RecordStatus::from_code(&self.status)
    }
}

impl Resource for Distributor {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn entity_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "distributors"
    }

    fn element_name() -> &'static str {
        "Distributor"
    }

    fn list_name() -> &'static str {
        "Distributors"
    }

    fn model_name() -> Option<ModelName> {
        Some(DISTRIBUTOR_MODEL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributorDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub warehouse_id: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    pub status: RecordStatus,
}

impl Default for DistributorDto {
    fn default() -> Self {
        Self {
            id: None,
            code: String::new(),
            name: String::new(),
            contact_person: None,
            phone: None,
            email: None,
            warehouse_id: None,
            region_id: None,
            status: RecordStatus::Active,
        }
    }
}

impl DistributorDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors
            .require("name", "Name", &self.name)
            .max_len("name", "Name", &self.name, 150)
            .max_len("code", "Code", &self.code, 30)
            .digits("phone", "Phone", self.phone.as_deref().unwrap_or_default(), &[10, 11, 12])
            .email("email", "Email", self.email.as_deref().unwrap_or_default());
        if self.warehouse_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            errors.add("warehouse_id", "Warehouse is required");
        }
        errors.into_result()
    }
}

impl From<&Distributor> for DistributorDto {
    fn from(d: &Distributor) -> Self {
        let ref_id = |r: &Option<NestedRef>| r.as_ref().and_then(NestedRef::id).map(str::to_string);
        Self {
            id: Some(d.id),
            code: d.code.clone(),
            name: d.name.clone(),
            contact_person: d.contact_person.clone(),
            phone: d.phone.clone(),
            email: d.email.clone(),
            warehouse_id: ref_id(&d.warehouse),
            region_id: ref_id(&d.region),
            status: d.status().unwrap_or(RecordStatus::Active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_row_with_string_encoded_warehouse() {
        let distributor: Distributor = serde_json::from_value(json!({
            "id": 9,
            "code": "DS-0009",
            "name": "Delta Trading",
            "warehouse": "{\"id\":2,\"code\":\"WH-2\",\"name\":\"East\"}",
            "region": null,
            "status": "Inactive"
        }))
        .unwrap();
        assert_eq!(distributor.status(), Some(RecordStatus::Inactive));
        let dto = DistributorDto::from(&distributor);
        assert_eq!(dto.warehouse_id.as_deref(), Some("2"));
        assert_eq!(dto.region_id, None);
        assert_eq!(dto.status, RecordStatus::Inactive);
    }

    #[test]
    fn validation_covers_contact_fields_and_warehouse() {
        let dto = DistributorDto {
            name: "Delta".into(),
            phone: Some("12ab".into()),
            email: Some("nope".into()),
            ..DistributorDto::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.get("phone").is_some());
        assert!(errors.get("email").is_some());
        assert_eq!(errors.get("warehouse_id"), Some("Warehouse is required"));
    }
}
