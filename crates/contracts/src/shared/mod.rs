pub mod api_envelope;
pub mod code_reservation;
pub mod export;
pub mod pagination;
pub mod projection;
pub mod validation;
