use serde::{Deserialize, Serialize};

use crate::domain::common::Resource;
use crate::shared::code_reservation::ModelName;
use crate::shared::validation::FieldErrors;

pub const ROUTE_TYPE_MODEL: ModelName = ModelName::new("route_types");

/// Category of a field route (retail visit, wholesale drop, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteType {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Resource for RouteType {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn entity_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "route-types"
    }

    fn element_name() -> &'static str {
        "Route type"
    }

    fn list_name() -> &'static str {
        "Route types"
    }

    fn model_name() -> Option<ModelName> {
        Some(ROUTE_TYPE_MODEL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteTypeDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl RouteTypeDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors
            .require("name", "Name", &self.name)
            .max_len("name", "Name", &self.name, 100)
            .max_len("code", "Code", &self.code, 30);
        errors.into_result()
    }
}

impl From<&RouteType> for RouteTypeDto {
    fn from(route_type: &RouteType) -> Self {
        Self {
            id: Some(route_type.id),
            code: route_type.code.clone(),
            name: route_type.name.clone(),
            description: route_type.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_dashed_collection() {
        assert_eq!(RouteType::api_path(), "/api/route-types");
        assert_eq!(RouteType::model_name().map(|m| m.as_str()), Some("route_types"));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let dto = RouteTypeDto {
            name: "x".repeat(101),
            ..RouteTypeDto::default()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name must not exceed 100 characters"));
    }
}
