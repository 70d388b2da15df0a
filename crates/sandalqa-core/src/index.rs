//! Vector index trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A document chunk returned by a similarity search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextChunk {
    pub id: String,
    pub content: String,
    pub score: Option<f32>,
    pub metadata: serde_json::Value,
}

/// Configuration for similarity search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub top_k: usize,
    pub score_threshold: Option<f32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            score_threshold: None,
        }
    }
}

/// Trait for hosted vector indexes (e.g. Qdrant).
///
/// The index holds pre-ingested document embeddings; this service only
/// provisions the collection at startup and reads from it per request.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create the backing collection if it does not exist and wait until
    /// the provider reports it ready. Idempotent, called once at startup.
    async fn ensure_collection(&self) -> Result<()>;

    /// Search for the chunks most similar to the query text, ranked by
    /// descending relevance score
    async fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<ContextChunk>>;

    /// Search using an already-computed embedding vector
    async fn search_by_vector(
        &self,
        vector: Vec<f32>,
        config: &SearchConfig,
    ) -> Result<Vec<ContextChunk>>;
}
