use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sandalqa_core::VectorIndex;
use sandalqa_gemini::{GeminiClient, GeminiConfig};
use sandalqa_rag::{QdrantConfig, QdrantVectorIndex, RagQaPipeline};

mod config;
mod http;

use config::{Cli, ServerConfig};
use http::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sandalqa=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let server = ServerConfig::load(&cli)?;

    // Initialize clients
    let gemini_config = GeminiConfig::from_env()?;
    let translation_model = gemini_config.translation_model.clone();
    let answer_model = gemini_config.generation_model.clone();
    let gemini = Arc::new(GeminiClient::new(gemini_config)?);

    let qdrant_config = QdrantConfig::from_env()?;
    let index = Arc::new(QdrantVectorIndex::new(qdrant_config, gemini.clone())?);

    // One-time idempotent bootstrap; requests never touch this path
    info!(collection = index.collection(), "provisioning vector collection");
    index.ensure_collection().await?;

    let pipeline = RagQaPipeline::new(gemini, index, translation_model, answer_model);
    let state = Arc::new(AppState { pipeline });
    let app = http::router(state);

    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
