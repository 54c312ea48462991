pub mod aggregate;

pub use aggregate::{Distributor, DistributorDto, DISTRIBUTOR_MODEL};
