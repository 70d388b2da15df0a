//! LLM provider trait and generation types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Configuration for a single text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: "gemini-pro".to_string(),
            max_tokens: 1024,
            temperature: None,
            top_p: None,
            stop_sequences: Vec::new(),
        }
    }
}

/// Result of a text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub model_id: String,
}

/// Trait for generative LLM providers (e.g. Gemini).
///
/// One provider serves both pipeline steps: query translation and answer
/// synthesis. Implementations own their HTTP client and credentials.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text using the provider's default model and settings
    async fn generate(&self, prompt: &str) -> Result<GenerationResult>;

    /// Generate text with an explicit configuration
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult>;

    /// The model ID used when no configuration is given
    fn model_id(&self) -> &str;
}
