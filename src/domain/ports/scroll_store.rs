use crate::domain::entities::scroll::Scroll;
use crate::domain::error::RetrievalError;

/// One ranked search result: the scroll's content and its cosine distance
/// from the query vector (smaller = more similar).
#[derive(Debug, Clone)]
pub struct ScrollHit {
    pub content: String,
    pub distance: f64,
}

pub trait ScrollStore: Send + Sync {
    /// Insert a scroll together with its embedding vector.
    fn insert(&self, scroll: &Scroll, vector: &[f32]) -> Result<(), RetrievalError>;

    /// Return up to `k` scrolls ordered by ascending distance from `vector`,
    /// ties broken by scroll id. An empty store yields an empty vec.
    fn search(&self, vector: &[f32], k: usize) -> Result<Vec<ScrollHit>, RetrievalError>;

    /// Scrolls that have no stored vector (after a model/dimension change).
    fn scrolls_missing_vectors(&self) -> Result<Vec<Scroll>, RetrievalError>;

    fn store_vector(&self, id: &str, vector: &[f32]) -> Result<(), RetrievalError>;

    fn count(&self) -> Result<usize, RetrievalError>;
}
