pub mod a001_brand;
pub mod a002_route_type;
pub mod a003_warehouse;
pub mod a004_distributor;
pub mod a005_sales_order;
pub mod a006_claim;
