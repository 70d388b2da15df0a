//! Retrieval-augmented answer generation.

use std::sync::Arc;

use sandalqa_core::{
    ContextChunk, Error, GenerationConfig, LlmProvider, Result, SearchConfig, VectorIndex,
};

/// Instruction template for answer synthesis. `{context}` receives the
/// retrieved chunks, `{question}` the translated query.
const ANSWER_PROMPT_TEMPLATE: &str = "\
You are an expert in sandalwood cultivation, known for providing clear, accurate, and comprehensive answers.
Given the context below, analyze it step-by-step and respond with a detailed, insightful answer. Ensure that your explanation covers all relevant aspects of the question, including practical advice, scientific background, and common best practices.

<context>
{context}
</context>
Question: {question}

Your answer should be structured as follows:
1. **Initial Analysis**: Briefly restate the question and identify the key aspects to address.
2. **Contextual Insights**: Extract and summarize the most important information from the context provided.
3. **Detailed Explanation**: Provide a thorough response that addresses the question, incorporating practical tips, industry knowledge, and evidence-based practices.
4. **Conclusion**: Summarize the main points and suggest any additional resources or next steps if applicable.";

/// An answer together with the chunks it was grounded in
#[derive(Debug, Clone)]
pub struct GroundedAnswer {
    pub answer: String,
    pub sources: Vec<ContextChunk>,
}

/// Produces grounded answers: retrieves relevant chunks from the vector
/// index, assembles the answer prompt, and asks the LLM.
pub struct RetrievalAnswerEngine<V: VectorIndex, L: LlmProvider> {
    index: Arc<V>,
    llm: Arc<L>,
    model_id: String,
    search: SearchConfig,
}

impl<V: VectorIndex, L: LlmProvider> RetrievalAnswerEngine<V, L> {
    /// Create an engine using the given answer model
    pub fn new(index: Arc<V>, llm: Arc<L>, model_id: impl Into<String>) -> Self {
        Self {
            index,
            llm,
            model_id: model_id.into(),
            search: SearchConfig::default(),
        }
    }

    /// Override the retrieval settings
    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Answer the given query, grounded in retrieved context.
    ///
    /// Index and provider failures surface as [`Error::AnswerGeneration`]
    /// carrying the underlying cause.
    pub async fn answer(&self, query: &str) -> Result<GroundedAnswer> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("cannot answer an empty query".to_string()));
        }

        let sources = self
            .index
            .search(query, &self.search)
            .await
            .map_err(|e| Error::AnswerGeneration(e.to_string()))?;

        let context = build_context(&sources);
        let prompt = build_answer_prompt(&context, query);

        let config = GenerationConfig {
            model_id: self.model_id.clone(),
            ..Default::default()
        };

        let result = self
            .llm
            .generate_with_config(&prompt, &config)
            .await
            .map_err(|e| Error::AnswerGeneration(e.to_string()))?;

        Ok(GroundedAnswer {
            answer: result.text,
            sources,
        })
    }
}

/// Join retrieved chunks into one context block, preserving rank order
fn build_context(chunks: &[ContextChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| chunk.content.trim())
        .filter(|content| !content.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_answer_prompt(context: &str, question: &str) -> String {
    ANSWER_PROMPT_TEMPLATE
        .replace("{context}", context)
        .replace("{question}", question)
}
