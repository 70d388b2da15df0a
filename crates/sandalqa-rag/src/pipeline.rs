//! The composed question answering pipeline.

use std::sync::Arc;

use async_trait::async_trait;

use sandalqa_core::{LlmProvider, QaPipeline, QueryAnswer, Result, SearchConfig, VectorIndex};

use crate::engine::RetrievalAnswerEngine;
use crate::translator::QueryTranslator;

/// Translate-then-answer pipeline over a vector index and an LLM provider.
///
/// Both steps share the provider; each uses its own model. The pipeline is
/// immutable after construction and shared across requests.
pub struct RagQaPipeline<L: LlmProvider, V: VectorIndex> {
    translator: QueryTranslator<L>,
    engine: RetrievalAnswerEngine<V, L>,
}

impl<L: LlmProvider, V: VectorIndex> RagQaPipeline<L, V> {
    /// Create a pipeline with the given translation and answer models
    pub fn new(
        llm: Arc<L>,
        index: Arc<V>,
        translation_model: impl Into<String>,
        answer_model: impl Into<String>,
    ) -> Self {
        Self {
            translator: QueryTranslator::new(llm.clone(), translation_model),
            engine: RetrievalAnswerEngine::new(index, llm, answer_model),
        }
    }

    /// Override the retrieval settings
    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.engine = self.engine.with_search_config(search);
        self
    }
}

#[async_trait]
impl<L, V> QaPipeline for RagQaPipeline<L, V>
where
    L: LlmProvider + 'static,
    V: VectorIndex + 'static,
{
    async fn answer_query(&self, query: &str) -> Result<QueryAnswer> {
        let translated_query = self.translator.translate(query).await?;
        let grounded = self.engine.answer(&translated_query).await?;

        Ok(QueryAnswer {
            translated_query,
            answer: grounded.answer,
            sources: grounded.sources,
        })
    }
}
