pub mod migrations;
pub mod scroll_store;
