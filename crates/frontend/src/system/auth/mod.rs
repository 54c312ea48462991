//! Bearer-token session: storage, REST calls and the Leptos context.

pub mod api;
pub mod context;
pub mod guard;
pub mod storage;
