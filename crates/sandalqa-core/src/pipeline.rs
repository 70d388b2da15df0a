//! Query pipeline trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{ContextChunk, Result};

/// Everything the pipeline produced for one query.
///
/// `sources` carries the chunks the answer was grounded in. The HTTP layer
/// currently drops them before responding; keeping them here means adding
/// citations later is a serializer change, not a pipeline change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub translated_query: String,
    pub answer: String,
    pub sources: Vec<ContextChunk>,
}

/// Trait for the end-to-end question answering pipeline.
///
/// Runs translation and retrieval-augmented answering in sequence for a
/// single query. Stateless across calls; safe to share behind an `Arc`.
#[async_trait]
pub trait QaPipeline: Send + Sync {
    async fn answer_query(&self, query: &str) -> Result<QueryAnswer>;
}
