//! Error types for the sandalwood QA service.

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the QA service.
///
/// The two step-level variants, [`Error::Translation`] and
/// [`Error::AnswerGeneration`], carry the cause text of whatever failed
/// underneath them. The HTTP layer maps each variant to a response
/// explicitly instead of collapsing everything into one catch-all.
#[derive(Error, Debug)]
pub enum Error {
    #[error("translation failed: {0}")]
    Translation(String),

    #[error("answer generation failed: {0}")]
    AnswerGeneration(String),

    #[error("LLM provider error: {0}")]
    LlmProvider(String),

    #[error("vector index error: {0}")]
    VectorIndex(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
