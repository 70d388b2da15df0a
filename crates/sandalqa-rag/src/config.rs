//! Qdrant configuration.

use serde::{Deserialize, Serialize};
use std::env;

use sandalqa_core::{Error, Result};

/// Configuration for the Qdrant-backed vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub collection: String,
    pub dimension: u64,
}

impl QdrantConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let url = env::var("QDRANT_URL").map_err(|_| {
            Error::Configuration("QDRANT_URL environment variable not found".to_string())
        })?;

        let api_key = env::var("QDRANT_API_KEY").ok();

        let collection =
            env::var("QDRANT_COLLECTION").unwrap_or_else(|_| "sandalwood-docs".to_string());

        let dimension = match env::var("EMBEDDING_DIMENSION") {
            Ok(raw) => raw.parse().map_err(|_| {
                Error::Configuration(format!("EMBEDDING_DIMENSION is not a valid size: {}", raw))
            })?,
            Err(_) => 768,
        };

        Ok(Self {
            url,
            api_key,
            collection,
            dimension,
        })
    }

    /// Create configuration with explicit values and default sizing
    pub fn new(url: String, collection: String) -> Self {
        Self {
            url,
            api_key: None,
            collection,
            dimension: 768,
        }
    }
}
