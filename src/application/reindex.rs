use crate::domain::error::RetrievalError;
use crate::domain::ports::embedder::{Embedder, InputType};
use crate::domain::ports::scroll_store::ScrollStore;
use std::sync::Arc;

/// Re-embeds scrolls whose vectors are missing, e.g. after switching the
/// embedding model or dimensionality.
pub struct ReindexUseCase {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn ScrollStore>,
}

impl ReindexUseCase {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn ScrollStore>) -> Self {
        Self { embedder, store }
    }

    pub async fn execute(&self) -> Result<usize, RetrievalError> {
        let scrolls = self.store.scrolls_missing_vectors()?;
        let total = scrolls.len();

        for scroll in &scrolls {
            let vector = self.embedder.embed(&scroll.content, InputType::Document).await?;
            self.store.store_vector(&scroll.id, &vector)?;
        }

        Ok(total)
    }
}
