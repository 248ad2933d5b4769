//! HTTP surface: three POST endpoints mirroring the analysis modes plus a
//! health probe. Input shape is resolved here, once, into the engine's
//! statically-typed entry points.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::engine::AnalysisEngine;
use crate::error::AnalysisError;
use crate::record::{AnalysisRecord, BatchSummary, CollectionResponse};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalysisEngine>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", post(analyze))
        .route("/collection", post(analyze_collection))
        .route("/summary", post(summarize))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    text: String,
    #[serde(default)]
    filters: Vec<String>,
}

#[derive(serde::Deserialize)]
struct CollectionReq {
    texts: Vec<String>,
}

/// Full analysis of a single post.
async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<AnalysisRecord>, ApiError> {
    let record = state.engine.analyze_text(&body.text, &body.filters).await?;
    Ok(Json(record))
}

/// Mood + toxicity for every post of a collection.
async fn analyze_collection(
    State(state): State<AppState>,
    Json(body): Json<CollectionReq>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let results = state.engine.analyze_collection(&body.texts).await?;
    Ok(Json(results))
}

/// Averaged mood + toxicity across a collection.
async fn summarize(
    State(state): State<AppState>,
    Json(body): Json<CollectionReq>,
) -> Result<Json<BatchSummary>, ApiError> {
    let summary = state.engine.summarize(&body.texts).await?;
    Ok(Json(summary))
}

/// Error wrapper mapping the analysis taxonomy onto HTTP statuses.
pub struct ApiError(AnalysisError);

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AnalysisError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AnalysisError::InferenceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AnalysisError::ChunkBoundary(_) | AnalysisError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        warn!(error = %self.0, %status, "request failed");
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
