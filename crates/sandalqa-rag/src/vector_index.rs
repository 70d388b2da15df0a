//! Qdrant-backed vector index.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    CollectionStatus, CreateCollectionBuilder, Distance, ScoredPoint, SearchPointsBuilder,
    Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use tokio::time::sleep;
use tracing::info;

use sandalqa_core::{ContextChunk, EmbeddingProvider, Error, Result, SearchConfig, VectorIndex};

use crate::config::QdrantConfig;

const READY_POLL_INTERVAL: Duration = Duration::from_secs(1);
const READY_POLL_ATTEMPTS: u32 = 30;

/// Payload keys checked, in order, for the chunk body. Ingestion tools differ
/// on which one they write.
const CONTENT_KEYS: [&str; 3] = ["content", "page_content", "text"];

/// Vector index over a hosted Qdrant collection.
///
/// Queries are embedded through the given provider, then searched with
/// cosine similarity against the pre-ingested document chunks.
pub struct QdrantVectorIndex<E: EmbeddingProvider> {
    client: Qdrant,
    embedder: Arc<E>,
    config: QdrantConfig,
}

impl<E: EmbeddingProvider> QdrantVectorIndex<E> {
    /// Create a new index handle from configuration
    pub fn new(config: QdrantConfig, embedder: Arc<E>) -> Result<Self> {
        let mut builder = Qdrant::from_url(&config.url);
        if let Some(api_key) = config.api_key.clone() {
            builder = builder.api_key(api_key);
        }
        let client = builder
            .build()
            .map_err(|e| Error::VectorIndex(e.to_string()))?;

        Ok(Self {
            client,
            embedder,
            config,
        })
    }

    /// Collection name this index reads from
    pub fn collection(&self) -> &str {
        &self.config.collection
    }
}

/// The provisioning operations a collection backend must support.
///
/// Split out from [`QdrantVectorIndex`] so the provisioning flow can be
/// exercised without a live cluster.
#[async_trait]
trait CollectionAdmin: Send + Sync {
    async fn exists(&self) -> Result<bool>;
    async fn create(&self) -> Result<()>;
    async fn is_ready(&self) -> Result<bool>;
}

/// Create the collection if absent and poll until the backend reports it
/// ready. When the collection already exists no creation call is made.
async fn provision<A: CollectionAdmin + ?Sized>(
    admin: &A,
    name: &str,
    attempts: u32,
    interval: Duration,
) -> Result<()> {
    if admin.exists().await? {
        return Ok(());
    }

    admin.create().await?;

    for _ in 0..attempts {
        if admin.is_ready().await? {
            return Ok(());
        }
        sleep(interval).await;
    }

    Err(Error::VectorIndex(format!(
        "collection '{}' did not become ready in time",
        name
    )))
}

#[async_trait]
impl<E: EmbeddingProvider> CollectionAdmin for QdrantVectorIndex<E> {
    async fn exists(&self) -> Result<bool> {
        self.client
            .collection_exists(self.config.collection.as_str())
            .await
            .map_err(|e| Error::VectorIndex(e.to_string()))
    }

    async fn create(&self) -> Result<()> {
        info!(collection = %self.config.collection, "creating vector collection");
        self.client
            .create_collection(
                CreateCollectionBuilder::new(self.config.collection.as_str()).vectors_config(
                    VectorParamsBuilder::new(self.config.dimension, Distance::Cosine),
                ),
            )
            .await
            .map_err(|e| Error::VectorIndex(e.to_string()))?;
        Ok(())
    }

    async fn is_ready(&self) -> Result<bool> {
        let info = self
            .client
            .collection_info(self.config.collection.as_str())
            .await
            .map_err(|e| Error::VectorIndex(e.to_string()))?;

        Ok(info
            .result
            .map(|collection| collection.status() == CollectionStatus::Green)
            .unwrap_or(false))
    }
}

#[async_trait]
impl<E: EmbeddingProvider> VectorIndex for QdrantVectorIndex<E> {
    async fn ensure_collection(&self) -> Result<()> {
        provision(
            self,
            &self.config.collection,
            READY_POLL_ATTEMPTS,
            READY_POLL_INTERVAL,
        )
        .await
    }

    async fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<ContextChunk>> {
        let vector = self.embedder.embed(query).await?;
        self.search_by_vector(vector, config).await
    }

    async fn search_by_vector(
        &self,
        vector: Vec<f32>,
        config: &SearchConfig,
    ) -> Result<Vec<ContextChunk>> {
        let mut request = SearchPointsBuilder::new(
            self.config.collection.as_str(),
            vector,
            config.top_k as u64,
        )
        .with_payload(true);

        if let Some(threshold) = config.score_threshold {
            request = request.score_threshold(threshold);
        }

        let response = self
            .client
            .search_points(request)
            .await
            .map_err(|e| Error::VectorIndex(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .map(scored_point_to_chunk)
            .collect())
    }
}

fn scored_point_to_chunk(point: ScoredPoint) -> ContextChunk {
    let id = point
        .id
        .and_then(|id| id.point_id_options)
        .map(|id| match id {
            PointIdOptions::Num(num) => num.to_string(),
            PointIdOptions::Uuid(uuid) => uuid,
        })
        .unwrap_or_default();

    let mut payload = point.payload;
    let content = extract_content(&mut payload);
    let metadata = serde_json::Value::Object(
        payload
            .into_iter()
            .map(|(key, value)| (key, value_to_json(value)))
            .collect(),
    );

    ContextChunk {
        id,
        content,
        score: Some(point.score),
        metadata,
    }
}

fn extract_content(payload: &mut HashMap<String, QdrantValue>) -> String {
    for key in CONTENT_KEYS {
        if let Some(value) = payload.remove(key) {
            if let Some(Kind::StringValue(text)) = value.kind {
                return text;
            }
        }
    }
    String::new()
}

fn value_to_json(value: QdrantValue) -> serde_json::Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(flag)) => serde_json::Value::Bool(flag),
        Some(Kind::IntegerValue(num)) => serde_json::json!(num),
        Some(Kind::DoubleValue(num)) => serde_json::json!(num),
        Some(Kind::StringValue(text)) => serde_json::Value::String(text),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(value_to_json).collect())
        }
        Some(Kind::StructValue(fields)) => serde_json::Value::Object(
            fields
                .fields
                .into_iter()
                .map(|(key, value)| (key, value_to_json(value)))
                .collect(),
        ),
    }
}
