//! Gemini client implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use sandalqa_core::{
    EmbeddingProvider, Error, GenerationConfig, GenerationResult, LlmProvider, Result,
};

use crate::config::GeminiConfig;

/// Gemini client over the Generative Language REST API.
///
/// Serves both text generation (`generateContent`) and query embeddings
/// (`embedContent`) with a single API key.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(rename = "stopSequences", skip_serializing_if = "Vec::is_empty")]
    stop_sequences: Vec<String>,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: RequestGenerationConfig,
}

#[derive(Deserialize)]
pub(crate) struct ResponsePart {
    pub(crate) text: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub(crate) parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
pub(crate) struct ResponseCandidate {
    pub(crate) content: Option<ResponseContent>,
}

#[derive(Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<ResponseCandidate>,
}

#[derive(Serialize)]
struct EmbedContentRequest {
    model: String,
    content: RequestContent,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: Option<ContentEmbedding>,
}

/// Pull the first candidate's text out of a generation response and trim
/// surrounding whitespace. A structurally empty response is a provider error.
pub(crate) fn first_candidate_text(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| Error::LlmProvider("response contained no generated text".to_string()))
}

impl GeminiClient {
    /// Create a new Gemini client from configuration
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new Gemini client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    /// Model configured for query translation
    pub fn translation_model(&self) -> &str {
        &self.config.translation_model
    }

    /// Model configured for answer synthesis
    pub fn generation_model(&self) -> &str {
        &self.config.generation_model
    }

    async fn perform_generation(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: RequestGenerationConfig {
                max_output_tokens: config.max_tokens,
                temperature: config.temperature,
                top_p: config.top_p,
                stop_sequences: config.stop_sequences.clone(),
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, config.model_id
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::LlmProvider(format!(
                "Gemini API request failed with status {}: {}",
                status, error_text
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        first_candidate_text(payload)
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let config = GenerationConfig {
            model_id: self.config.generation_model.clone(),
            ..Default::default()
        };
        self.generate_with_config(prompt, &config).await
    }

    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let text = self.perform_generation(prompt, config).await?;

        Ok(GenerationResult {
            text,
            model_id: config.model_id.clone(),
        })
    }

    fn model_id(&self) -> &str {
        &self.config.generation_model
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request_body = EmbedContentRequest {
            model: format!("models/{}", self.config.embedding_model),
            content: RequestContent {
                parts: vec![RequestPart {
                    text: text.to_string(),
                }],
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:embedContent",
            self.config.api_url, self.config.embedding_model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::LlmProvider(format!(
                "Gemini embedding request failed with status {}: {}",
                status, error_text
            )));
        }

        let payload: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let values = payload
            .embedding
            .map(|embedding| embedding.values)
            .unwrap_or_default();

        if values.is_empty() {
            return Err(Error::LlmProvider(
                "embedding response contained no values".to_string(),
            ));
        }

        Ok(values)
    }

    fn embedding_model_id(&self) -> &str {
        &self.config.embedding_model
    }
}
