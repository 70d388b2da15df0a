//! Gemini integration for the sandalwood QA service.
//!
//! This crate provides the Gemini implementation of the `LlmProvider` and
//! `EmbeddingProvider` traits over the Generative Language REST API.

mod client;
mod config;


pub use client::GeminiClient;
pub use config::GeminiConfig;

// Re-export core types for convenience
pub use sandalqa_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LlmProvider, Result,
};
