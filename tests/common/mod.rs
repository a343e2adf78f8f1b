//! Shared test helpers.

use grimoire::domain::error::RetrievalError;
use grimoire::domain::ports::embedder::{Embedder, InputType};
use grimoire::Grimoire;
use std::collections::HashMap;
use std::sync::Arc;

/// Deterministic embedder: known texts map to fixed vectors, anything else
/// gets a constant fallback.
pub struct StubEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl StubEmbedder {
    pub fn new(mapping: Vec<(&str, Vec<f32>)>) -> Self {
        let dimension = mapping.first().map(|(_, v)| v.len()).unwrap_or(3);
        Self {
            vectors: mapping
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            dimension,
        }
    }
}

#[async_trait::async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str, _input_type: InputType) -> Result<Vec<f32>, RetrievalError> {
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![1.0; self.dimension]))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Embedder that always fails, for failure-injection tests.
pub struct FailingEmbedder;

#[async_trait::async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str, _input_type: InputType) -> Result<Vec<f32>, RetrievalError> {
        Err(RetrievalError::Embedding("provider unreachable".into()))
    }

    fn dimension(&self) -> usize {
        3
    }
}

pub fn setup_with(mapping: Vec<(&str, Vec<f32>)>) -> Grimoire {
    Grimoire::with_providers(":memory:", Arc::new(StubEmbedder::new(mapping))).unwrap()
}

pub fn setup() -> Grimoire {
    setup_with(vec![])
}
