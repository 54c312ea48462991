use serde::{Deserialize, Serialize};

use crate::domain::common::Resource;
use crate::shared::code_reservation::ModelName;
use crate::shared::projection::{default_active, deserialize_active_flag};
use crate::shared::validation::FieldErrors;

pub const BRAND_MODEL: ModelName = ModelName::new("brand");

// ============================================================================
// Record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active", deserialize_with = "deserialize_active_flag")]
    pub is_active: bool,
}

impl Resource for Brand {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn entity_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "brands"
    }

    fn element_name() -> &'static str {
        "Brand"
    }

    fn list_name() -> &'static str {
        "Brands"
    }

    fn model_name() -> Option<ModelName> {
        Some(BRAND_MODEL)
    }
}

// ============================================================================
// Form DTO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
}

impl Default for BrandDto {
    fn default() -> Self {
        Self {
            id: None,
            code: String::new(),
            name: String::new(),
            description: None,
            is_active: true,
        }
    }
}

impl BrandDto {
    /// The code is checked by the reservation, not here.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors
            .require("name", "Name", &self.name)
            .max_len("name", "Name", &self.name, 100)
            .max_len("code", "Code", &self.code, 30)
            .max_len(
                "description",
                "Description",
                self.description.as_deref().unwrap_or_default(),
                500,
            );
        errors.into_result()
    }
}

impl From<&Brand> for BrandDto {
    fn from(brand: &Brand) -> Self {
        Self {
            id: Some(brand.id),
            code: brand.code.clone(),
            name: brand.name.clone(),
            description: brand.description.clone(),
            is_active: brand.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_row_with_numeric_flag() {
        let brand: Brand = serde_json::from_value(json!({
            "id": 3, "code": "BR-0003", "name": "Sunrise", "is_active": 0
        }))
        .unwrap();
        assert!(!brand.is_active);
        assert_eq!(brand.description, None);
        assert_eq!(Brand::item_path(&brand.id()), "/api/brands/3");
        assert_eq!(Brand::model_name(), Some(BRAND_MODEL));
    }

    #[test]
    fn dto_requires_name_and_omits_missing_id() {
        let dto = BrandDto::default();
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));

        let body = serde_json::to_value(BrandDto {
            name: "Sunrise".into(),
            ..BrandDto::default()
        })
        .unwrap();
        assert!(body.get("id").is_none());
    }
}
