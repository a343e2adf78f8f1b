use crate::domain::entities::scroll::Scroll;
use crate::domain::error::RetrievalError;
use crate::domain::ports::embedder::{Embedder, InputType};
use crate::domain::ports::scroll_store::ScrollStore;
use std::sync::Arc;

pub struct AddScrollUseCase {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn ScrollStore>,
}

impl AddScrollUseCase {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn ScrollStore>) -> Self {
        Self { embedder, store }
    }

    pub async fn execute(&self, content: String) -> Result<Scroll, RetrievalError> {
        if content.trim().is_empty() {
            return Err(RetrievalError::InvalidInput(
                "scroll content must be non-empty".into(),
            ));
        }

        let vector = self.embedder.embed(&content, InputType::Document).await?;
        let scroll = Scroll::new(content);
        self.store.insert(&scroll, &vector)?;
        Ok(scroll)
    }
}
