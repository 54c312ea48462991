//! Tab content and titles.
//!
//! - `page`: wrapper that hides inactive tabs
//! - `registry`: tab key to view
//! - `tab_labels`: tab keys and titles

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key};
