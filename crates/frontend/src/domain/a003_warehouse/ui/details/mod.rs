//! Warehouse details form
//!
//! - model.rs: form body mapping, region lookup
//! - view_model.rs: signals and commands
//! - view.rs: Leptos component

mod model;
mod view;
mod view_model;

pub use model::fetch_regions;
pub use view::WarehouseDetails;
pub use view_model::WarehouseDetailsViewModel;
