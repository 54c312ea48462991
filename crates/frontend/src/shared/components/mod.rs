pub mod code_field;
pub mod data_table;
pub mod filter_panel;
pub mod form_field;
pub mod pagination_controls;
pub mod search_input;
pub mod ui;
