use crate::domain::error::RetrievalError;

/// Task-type tag sent to the embedding provider. Stored scrolls are embedded
/// as `Document`; lookups reuse the same tag so both sides live in the same
/// vector space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Document,
    Query,
}

#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one text into a vector of `self.dimension()` floats.
    /// Every call hits the provider; callers needing caching layer it on top.
    async fn embed(&self, text: &str, input_type: InputType) -> Result<Vec<f32>, RetrievalError>;

    fn dimension(&self) -> usize;
}
