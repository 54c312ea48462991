//! Route type details form (model / view_model / view)

mod model;
mod view;
mod view_model;

pub use view::RouteTypeDetails;
pub use view_model::RouteTypeDetailsViewModel;
