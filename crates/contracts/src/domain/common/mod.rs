//! Common types and traits for all backend records

pub mod record_id;
pub mod resource;

pub use record_id::RecordId;
pub use resource::Resource;
