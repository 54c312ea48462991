mod model;
mod view;
mod view_model;

pub use view::DistributorDetails;
pub use view_model::DistributorDetailsViewModel;
