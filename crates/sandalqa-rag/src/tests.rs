//! Pipeline tests with scripted collaborators

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use sandalqa_core::{
    ContextChunk, Error, GenerationConfig, GenerationResult, LlmProvider, QaPipeline, Result,
    SearchConfig, VectorIndex,
};

use crate::{QueryTranslator, RagQaPipeline, RetrievalAnswerEngine};

/// LLM double that replays a fixed sequence of responses and records every
/// prompt it was given.
struct ScriptedLlm {
    responses: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    fn with_responses(responses: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        self.generate_with_config(prompt, &GenerationConfig::default())
            .await
    }

    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::LlmProvider("no scripted response".to_string())));

        next.map(|text| GenerationResult {
            text,
            model_id: config.model_id.clone(),
        })
    }

    fn model_id(&self) -> &str {
        "scripted-model"
    }
}

/// Index double serving a fixed chunk set and counting searches.
struct StaticIndex {
    chunks: Vec<ContextChunk>,
    fail: bool,
    searches: AtomicUsize,
}

impl StaticIndex {
    fn with_chunks(chunks: Vec<ContextChunk>) -> Arc<Self> {
        Arc::new(Self {
            chunks,
            fail: false,
            searches: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            chunks: Vec::new(),
            fail: true,
            searches: AtomicUsize::new(0),
        })
    }

    fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorIndex for StaticIndex {
    async fn ensure_collection(&self) -> Result<()> {
        Ok(())
    }

    async fn search(&self, _query: &str, config: &SearchConfig) -> Result<Vec<ContextChunk>> {
        self.searches.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(Error::VectorIndex("index unreachable".to_string()));
        }

        Ok(self.chunks.iter().take(config.top_k).cloned().collect())
    }

    async fn search_by_vector(
        &self,
        _vector: Vec<f32>,
        config: &SearchConfig,
    ) -> Result<Vec<ContextChunk>> {
        self.search("", config).await
    }
}

fn chunk(id: &str, content: &str) -> ContextChunk {
    ContextChunk {
        id: id.to_string(),
        content: content.to_string(),
        score: Some(0.9),
        metadata: json!({}),
    }
}

mod translator {
    use super::*;

    #[tokio::test]
    async fn builds_the_instruction_prompt_and_trims_the_result() {
        let llm = ScriptedLlm::with_responses(vec![Ok("  Quel sol est le meilleur?  ".into())]);
        let translator = QueryTranslator::new(llm.clone(), "gemini-1.5-pro");

        let translated = translator.translate("Which soil is best?").await.unwrap();

        assert_eq!(translated, "Quel sol est le meilleur?");
        assert_eq!(
            llm.prompts(),
            vec!["Translate the following text to en: 'Which soil is best?'".to_string()]
        );
    }

    #[tokio::test]
    async fn target_language_is_configurable() {
        let llm = ScriptedLlm::with_responses(vec![Ok("hola".into())]);
        let translator = QueryTranslator::new(llm.clone(), "gemini-1.5-pro").with_target_lang("es");

        translator.translate("hello").await.unwrap();

        assert!(llm.prompts()[0].starts_with("Translate the following text to es:"));
    }

    #[tokio::test]
    async fn provider_failures_become_translation_errors() {
        let llm = ScriptedLlm::with_responses(vec![Err(Error::LlmProvider(
            "rate limited".to_string(),
        ))]);
        let translator = QueryTranslator::new(llm, "gemini-1.5-pro");

        let err = translator.translate("hello").await.unwrap_err();

        assert!(matches!(err, Error::Translation(_)));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn empty_input_never_reaches_the_provider() {
        let llm = ScriptedLlm::with_responses(vec![]);
        let translator = QueryTranslator::new(llm.clone(), "gemini-1.5-pro");

        let err = translator.translate("   ").await.unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(llm.prompts().is_empty());
    }
}

mod engine {
    use super::*;

    #[tokio::test]
    async fn retrieved_chunks_feed_the_answer_prompt() {
        let index = StaticIndex::with_chunks(vec![chunk("1", "Sandy loam suits sandalwood.")]);
        let llm = ScriptedLlm::with_responses(vec![Ok("Sandy loam soils.".into())]);
        let engine = RetrievalAnswerEngine::new(index, llm.clone(), "gemini-pro");

        let grounded = engine.answer("What soil is best?").await.unwrap();

        assert_eq!(grounded.answer, "Sandy loam soils.");
        assert_eq!(grounded.sources.len(), 1);

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Sandy loam suits sandalwood."));
        assert!(prompt.contains("Question: What soil is best?"));
    }

    #[tokio::test]
    async fn index_failures_become_answer_generation_errors() {
        let index = StaticIndex::failing();
        let llm = ScriptedLlm::with_responses(vec![]);
        let engine = RetrievalAnswerEngine::new(index, llm.clone(), "gemini-pro");

        let err = engine.answer("What soil is best?").await.unwrap_err();

        assert!(matches!(err, Error::AnswerGeneration(_)));
        assert!(err.to_string().contains("index unreachable"));
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn provider_failures_become_answer_generation_errors() {
        let index = StaticIndex::with_chunks(vec![chunk("1", "context")]);
        let llm = ScriptedLlm::with_responses(vec![Err(Error::Network(
            "connection reset".to_string(),
        ))]);
        let engine = RetrievalAnswerEngine::new(index, llm, "gemini-pro");

        let err = engine.answer("What soil is best?").await.unwrap_err();

        assert!(matches!(err, Error::AnswerGeneration(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}

mod pipeline {
    use super::*;

    #[tokio::test]
    async fn translates_then_answers() {
        let index = StaticIndex::with_chunks(vec![chunk("1", "Sandy loam suits sandalwood.")]);
        let llm = ScriptedLlm::with_responses(vec![
            Ok("What soil is best?".into()),
            Ok("Sandy loam soils.".into()),
        ]);
        let pipeline = RagQaPipeline::new(llm, index.clone(), "gemini-1.5-pro", "gemini-pro");

        let answer = pipeline.answer_query("What soil is best?").await.unwrap();

        assert_eq!(answer.translated_query, "What soil is best?");
        assert_eq!(answer.answer, "Sandy loam soils.");
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(index.search_count(), 1);
    }

    #[tokio::test]
    async fn translation_failure_short_circuits_retrieval() {
        let index = StaticIndex::with_chunks(vec![chunk("1", "context")]);
        let llm = ScriptedLlm::with_responses(vec![Err(Error::LlmProvider(
            "model overloaded".to_string(),
        ))]);
        let pipeline = RagQaPipeline::new(llm, index.clone(), "gemini-1.5-pro", "gemini-pro");

        let err = pipeline.answer_query("What soil is best?").await.unwrap_err();

        assert!(matches!(err, Error::Translation(_)));
        assert_eq!(index.search_count(), 0);
    }

    #[tokio::test]
    async fn answer_failure_surfaces_after_translation() {
        let index = StaticIndex::failing();
        let llm = ScriptedLlm::with_responses(vec![Ok("What soil is best?".into())]);
        let pipeline = RagQaPipeline::new(llm, index, "gemini-1.5-pro", "gemini-pro");

        let err = pipeline.answer_query("What soil is best?").await.unwrap_err();

        assert!(matches!(err, Error::AnswerGeneration(_)));
    }
}
