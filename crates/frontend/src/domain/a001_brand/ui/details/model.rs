use contracts::domain::a001_brand::{Brand, BrandDto};
use contracts::shared::validation::FieldErrors;

use crate::shared::details::FormDto;

impl FormDto for BrandDto {
    type Record = Brand;

    fn from_record(record: &Brand) -> Self {
        BrandDto::from(record)
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        BrandDto::validate(self)
    }

    fn with_code(self, code: String) -> Self {
        Self { code, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_code_goes_into_the_body() {
        let dto = BrandDto {
            name: "Sunrise".into(),
            ..BrandDto::default()
        }
        .with_code("BR-0009".into());
        assert_eq!(dto.code, "BR-0009");
        assert_eq!(dto.name, "Sunrise");
    }
}
