pub mod aggregate;

pub use aggregate::{Brand, BrandDto, BRAND_MODEL};
