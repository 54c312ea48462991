pub mod aggregate;

pub use aggregate::{RouteType, RouteTypeDto, ROUTE_TYPE_MODEL};
