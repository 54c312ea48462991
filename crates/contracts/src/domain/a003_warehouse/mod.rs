pub mod aggregate;

pub use aggregate::{Warehouse, WarehouseDto, WAREHOUSE_MODEL};
