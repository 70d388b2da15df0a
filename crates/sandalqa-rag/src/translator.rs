//! Query translation via the LLM provider.

use std::sync::Arc;

use tracing::debug;

use sandalqa_core::{Error, GenerationConfig, LlmProvider, Result};

/// Default language code queries are translated into. The answer prompt is
/// written in English, so the retrieval side works in English too.
const DEFAULT_TARGET_LANG: &str = "en";

/// Rewrites free-text queries into the pipeline's working language.
pub struct QueryTranslator<L: LlmProvider> {
    llm: Arc<L>,
    model_id: String,
    target_lang: String,
}

impl<L: LlmProvider> QueryTranslator<L> {
    /// Create a translator using the given model
    pub fn new(llm: Arc<L>, model_id: impl Into<String>) -> Self {
        Self {
            llm,
            model_id: model_id.into(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
        }
    }

    /// Override the target language code
    pub fn with_target_lang(mut self, target_lang: impl Into<String>) -> Self {
        self.target_lang = target_lang.into();
        self
    }

    /// Translate the given text into the target language.
    ///
    /// Provider failures and structurally empty responses surface as
    /// [`Error::Translation`] carrying the underlying cause.
    pub async fn translate(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "cannot translate empty text".to_string(),
            ));
        }

        let prompt = format!(
            "Translate the following text to {}: '{}'",
            self.target_lang, text
        );

        let config = GenerationConfig {
            model_id: self.model_id.clone(),
            max_tokens: 256,
            ..Default::default()
        };

        let result = self
            .llm
            .generate_with_config(&prompt, &config)
            .await
            .map_err(|e| Error::Translation(e.to_string()))?;

        let translated = result.text.trim().to_string();
        if translated.is_empty() {
            return Err(Error::Translation(
                "provider returned an empty translation".to_string(),
            ));
        }

        debug!(%translated, "query translated");
        Ok(translated)
    }
}
