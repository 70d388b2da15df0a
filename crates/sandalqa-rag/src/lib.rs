//! Retrieval-augmented answering pipeline for the sandalwood QA service.
//!
//! This crate provides the Qdrant-backed vector index, the query translator,
//! the answer engine, and the pipeline that composes them.

mod config;
mod engine;
mod pipeline;
mod translator;
mod vector_index;

#[cfg(test)]
mod tests;

pub use config::QdrantConfig;
pub use engine::{GroundedAnswer, RetrievalAnswerEngine};
pub use pipeline::RagQaPipeline;
pub use translator::QueryTranslator;
pub use vector_index::QdrantVectorIndex;

// Re-export core types for convenience
pub use sandalqa_core::{
    ContextChunk, EmbeddingProvider, Error, LlmProvider, QaPipeline, QueryAnswer, Result,
    SearchConfig, VectorIndex,
};
