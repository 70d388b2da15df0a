//! HTTP surface for the QA service.
//!
//! One POST route runs the pipeline; validation failures never reach it.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use sandalqa_core::{Error, QaPipeline};


/// Read-only application state shared by all requests
pub struct AppState<P: QaPipeline> {
    pub pipeline: P,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub original_query: String,
    pub translated_query: String,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn router<P: QaPipeline + 'static>(state: Arc<AppState<P>>) -> Router {
    Router::new()
        .route("/query", post(handle_query::<P>))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Handler: POST /query
///
/// Validates the body, runs translation then retrieval-augmented answering,
/// and returns the original query, the translated query, and the answer.
async fn handle_query<P: QaPipeline>(
    State(state): State<Arc<AppState<P>>>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorBody>)> {
    let query = match body.query {
        Some(query) if !query.trim().is_empty() => query,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "Invalid request. 'query' field is missing.".to_string(),
                }),
            ));
        }
    };

    match state.pipeline.answer_query(&query).await {
        Ok(answer) => Ok(Json(QueryResponse {
            original_query: query,
            translated_query: answer.translated_query,
            response: answer.answer,
        })),
        Err(err) => {
            error!("query processing failed: {err}");
            Err(error_response(err))
        }
    }
}

/// Map each error kind to a response deliberately. Step failures keep their
/// cause text inside the error envelope.
fn error_response(err: Error) -> (StatusCode, Json<ErrorBody>) {
    let status = match err {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::Translation(_) | Error::AnswerGeneration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorBody {
            error: format!("Error processing the query: {}", err),
        }),
    )
}
