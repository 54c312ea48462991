use contracts::domain::a002_route_type::{RouteType, RouteTypeDto};
use contracts::shared::validation::FieldErrors;

use crate::shared::details::FormDto;

impl FormDto for RouteTypeDto {
    type Record = RouteType;

    fn from_record(record: &RouteType) -> Self {
        RouteTypeDto::from(record)
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        RouteTypeDto::validate(self)
    }

    fn with_code(self, code: String) -> Self {
        Self { code, ..self }
    }
}
