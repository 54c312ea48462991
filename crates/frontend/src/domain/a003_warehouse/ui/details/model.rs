use contracts::domain::a003_warehouse::{Warehouse, WarehouseDto};
use contracts::shared::api_envelope::ApiError;
use contracts::shared::validation::FieldErrors;

use crate::shared::details::FormDto;
use crate::shared::lookups::{fetch_lookup, LookupOption};

impl FormDto for WarehouseDto {
    type Record = Warehouse;

    fn from_record(record: &Warehouse) -> Self {
        WarehouseDto::from(record)
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        WarehouseDto::validate(self)
    }

    fn with_code(self, code: String) -> Self {
        Self { code, ..self }
    }
}

pub async fn fetch_regions() -> Result<Vec<LookupOption>, ApiError> {
    fetch_lookup("/api/regions").await
}
