//! Brand details form
//!
//! - model.rs: form body mapping for the REST calls
//! - view_model.rs: signals and commands
//! - view.rs: Leptos component

mod model;
mod view;
mod view_model;

pub use view::BrandDetails;
pub use view_model::BrandDetailsViewModel;
