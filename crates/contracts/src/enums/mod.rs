pub mod claim_status;
pub mod order_status;
pub mod record_status;

pub use claim_status::ClaimStatus;
pub use order_status::OrderStatus;
pub use record_status::RecordStatus;
