use crate::domain::error::RetrievalError;
use crate::domain::ports::embedder::{Embedder, InputType};
use crate::domain::ports::scroll_store::ScrollStore;
use std::sync::Arc;

/// Number of scrolls returned per lookup.
pub const LOOKUP_K: usize = 3;

/// The retrieval pipeline: embed the name, then nearest-neighbor search.
/// Errors propagate typed from here; the sentinel-string conversion happens
/// at the `Grimoire::lookup` boundary.
pub struct LookupUseCase {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn ScrollStore>,
}

impl LookupUseCase {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn ScrollStore>) -> Self {
        Self { embedder, store }
    }

    /// Returns the contents of up to [`LOOKUP_K`] scrolls, most similar first.
    /// An empty result is a normal outcome, not an error.
    pub async fn execute(&self, name: &str) -> Result<Vec<String>, RetrievalError> {
        if name.trim().is_empty() {
            return Err(RetrievalError::InvalidInput(
                "lookup name must be non-empty".into(),
            ));
        }

        // The stored scrolls were embedded as documents; the lookup uses the
        // same tag to keep both sides of the distance comparable.
        let vector = self.embedder.embed(name, InputType::Document).await?;

        let hits = self.store.search(&vector, LOOKUP_K)?;
        Ok(hits.into_iter().map(|h| h.content).collect())
    }
}
