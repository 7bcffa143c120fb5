//! Document retrieval port
//!
//! Optional grounding for prosecutor and judge prompts. A trial runs with
//! no retrieval at all when no document corpus is available.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the retrieval subsystem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Index unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to load documents: {0}")]
    Load(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Text returned for a retrieval query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalResponse {
    pub response_text: String,
}

impl RetrievalResponse {
    pub fn new(response_text: impl Into<String>) -> Self {
        Self {
            response_text: response_text.into(),
        }
    }
}

/// A ready-to-query document index.
#[async_trait]
pub trait RetrievalPort: Send + Sync {
    async fn query(&self, question: &str) -> Result<RetrievalResponse, RetrievalError>;
}

/// Builds the retrieval index at trial start.
///
/// `Ok(None)` means there is no document source to index (for example an
/// empty documents directory); the trial then runs without retrieval.
#[async_trait]
pub trait RetrievalInitializer: Send + Sync {
    async fn initialize(&self) -> Result<Option<Arc<dyn RetrievalPort>>, RetrievalError>;
}
