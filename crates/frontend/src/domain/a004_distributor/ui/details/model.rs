use contracts::domain::a004_distributor::{Distributor, DistributorDto};
use contracts::enums::RecordStatus;
use contracts::shared::validation::FieldErrors;

use crate::shared::details::FormDto;

impl FormDto for DistributorDto {
    type Record = Distributor;

    fn from_record(record: &Distributor) -> Self {
        DistributorDto::from(record)
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        DistributorDto::validate(self)
    }

    fn with_code(self, code: String) -> Self {
        Self { code, ..self }
    }
}

pub fn status_options() -> Vec<(String, String)> {
    RecordStatus::all()
        .into_iter()
        .map(|s| (s.code().to_string(), s.display_name().to_string()))
        .collect()
}
