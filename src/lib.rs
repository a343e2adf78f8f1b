pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::add_scroll::AddScrollUseCase;
use crate::application::lookup::LookupUseCase;
use crate::application::reindex::ReindexUseCase;
use crate::domain::entities::scroll::Scroll;
use crate::domain::error::RetrievalError;
use crate::domain::ports::embedder::Embedder;
use crate::domain::ports::scroll_store::ScrollStore;
use crate::infrastructure::embeddings::gemini::GeminiEmbedder;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::scroll_store::SqliteScrollStore;
use rusqlite::Connection;
use std::sync::Arc;

/// Separator between scroll bodies in a lookup response.
pub const KNOWLEDGE_SEPARATOR: &str = "\n---\n";

/// Returned when the pipeline fails for any reason. The caller never sees a
/// structured error from `lookup`.
pub const FAILURE_SENTINEL: &str =
    "A mist has clouded the Grimoire, and the knowledge could not be retrieved.";

pub fn no_knowledge_sentinel(name: &str) -> String {
    format!("The Grimoire contains no knowledge of '{name}'.")
}

pub struct Grimoire {
    lookup_uc: LookupUseCase,
    add_scroll_uc: AddScrollUseCase,
    reindex_uc: ReindexUseCase,
    store: Arc<dyn ScrollStore>,
}

impl Grimoire {
    /// Build from environment configuration, with the Gemini embedding
    /// provider. See `with_providers` for injecting a fake in tests.
    pub fn new(db_path: &str) -> Result<Self, RetrievalError> {
        let api_key = std::env::var("GRIMOIRE_API_KEY").unwrap_or_default();
        let model = std::env::var("GRIMOIRE_EMBEDDING_MODEL").ok();
        let dimension = std::env::var("GRIMOIRE_EMBEDDING_DIM")
            .ok()
            .and_then(|d| d.parse().ok());
        let base_url = std::env::var("GRIMOIRE_EMBEDDING_BASE_URL").ok();

        let embedder: Arc<dyn Embedder> =
            Arc::new(GeminiEmbedder::new(api_key, model, dimension, base_url)?);
        Self::with_providers(db_path, embedder)
    }

    pub fn with_providers(
        db_path: &str,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, RetrievalError> {
        let conn = Connection::open(db_path)
            .map_err(|e| RetrievalError::Store(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| RetrievalError::Store(format!("WAL error: {e}")))?;

        run_migrations(&conn)?;

        let store: Arc<dyn ScrollStore> = Arc::new(SqliteScrollStore::new(conn));

        Ok(Self {
            lookup_uc: LookupUseCase::new(embedder.clone(), store.clone()),
            add_scroll_uc: AddScrollUseCase::new(embedder.clone(), store.clone()),
            reindex_uc: ReindexUseCase::new(embedder, store.clone()),
            store,
        })
    }

    /// The tool surface consumed by the agent framework: one string in, one
    /// string out, never an error. Failures are logged and collapsed into
    /// [`FAILURE_SENTINEL`]; an empty result becomes the "no knowledge"
    /// sentinel.
    pub async fn lookup(&self, name: &str) -> String {
        match self.try_lookup(name).await {
            Ok(contents) if contents.is_empty() => no_knowledge_sentinel(name),
            Ok(contents) => contents.join(KNOWLEDGE_SEPARATOR),
            Err(e) => {
                tracing::error!(name = %name, error = %e, "Grimoire lookup failed");
                FAILURE_SENTINEL.to_string()
            }
        }
    }

    /// Typed variant of [`Grimoire::lookup`] for callers that want the error.
    pub async fn try_lookup(&self, name: &str) -> Result<Vec<String>, RetrievalError> {
        self.lookup_uc.execute(name).await
    }

    pub async fn add_scroll(&self, content: String) -> Result<Scroll, RetrievalError> {
        self.add_scroll_uc.execute(content).await
    }

    pub async fn reindex(&self) -> Result<usize, RetrievalError> {
        self.reindex_uc.execute().await
    }

    pub fn scroll_count(&self) -> Result<usize, RetrievalError> {
        self.store.count()
    }
}
