use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<String> for RetrievalError {
    fn from(s: String) -> Self {
        RetrievalError::Store(s)
    }
}

impl From<&str> for RetrievalError {
    fn from(s: &str) -> Self {
        RetrievalError::InvalidInput(s.to_string())
    }
}
