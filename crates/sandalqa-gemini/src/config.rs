//! Gemini configuration.

use serde::{Deserialize, Serialize};
use std::env;

use sandalqa_core::{Error, Result};

/// Configuration for the Gemini client.
///
/// Translation and answer synthesis may use different models, so both IDs
/// are carried here alongside the embedding model used for query vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_url: String,
    pub generation_model: String,
    pub translation_model: String,
    pub embedding_model: String,
}

impl GeminiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .map_err(|_| {
                Error::Configuration(
                    "GEMINI_API_KEY or GOOGLE_API_KEY environment variable not found".to_string(),
                )
            })?;

        let api_url = env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let generation_model =
            env::var("GEMINI_GENERATION_MODEL").unwrap_or_else(|_| "gemini-pro".to_string());

        let translation_model =
            env::var("GEMINI_TRANSLATION_MODEL").unwrap_or_else(|_| "gemini-1.5-pro".to_string());

        let embedding_model =
            env::var("GEMINI_EMBEDDING_MODEL").unwrap_or_else(|_| "text-embedding-004".to_string());

        Ok(Self {
            api_key,
            api_url,
            generation_model,
            translation_model,
            embedding_model,
        })
    }

    /// Create configuration with an explicit key and default models
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            generation_model: "gemini-pro".to_string(),
            translation_model: "gemini-1.5-pro".to_string(),
            embedding_model: "text-embedding-004".to_string(),
        }
    }
}
