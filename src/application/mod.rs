pub mod add_scroll;
pub mod lookup;
pub mod reindex;
