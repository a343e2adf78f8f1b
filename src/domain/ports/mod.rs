pub mod embedder;
pub mod scroll_store;
