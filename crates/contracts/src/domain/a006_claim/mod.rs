pub mod aggregate;

pub use aggregate::{Claim, ClaimFilter, ClaimStatusUpdate};
