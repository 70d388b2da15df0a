//! Embedding provider trait.

use async_trait::async_trait;

use crate::Result;

/// Trait for text embedding providers.
///
/// Converts text into a fixed-dimension vector for similarity search. The
/// vector index uses this to embed incoming queries; document embeddings are
/// produced outside this service.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Produce an embedding vector for the given text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// The embedding model ID in use
    fn embedding_model_id(&self) -> &str;
}
