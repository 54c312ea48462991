pub mod aggregate;

pub use aggregate::{SalesOrder, SalesOrderFilter};
