//! Core traits and types for the sandalwood QA service.
//!
//! This crate defines the interfaces the service is assembled from: LLM
//! providers, embedding providers, vector indexes, and the query pipeline.
//! Keeping them as traits makes the system test-friendly and lets the HTTP
//! layer stay agnostic of which hosted services back them.

pub mod embedding;
pub mod error;
pub mod index;
pub mod llm;
pub mod pipeline;

pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use index::{ContextChunk, SearchConfig, VectorIndex};
pub use llm::{GenerationConfig, GenerationResult, LlmProvider};
pub use pipeline::{QaPipeline, QueryAnswer};
