//! Routes and handlers

use crate::error::ApiError;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tribo_core::{EngineStatistics, RequestContext, Tribo, TriboValue};

/// Shared state for handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub tribo: Tribo,
    /// Budget for one lookup
    pub request_timeout: Duration,
    /// Parent of every request's cancellation token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(tribo: Tribo, request_timeout: Duration, shutdown: CancellationToken) -> Self {
        Self {
            tribo,
            request_timeout,
            shutdown,
        }
    }

    fn request_context(&self) -> RequestContext {
        RequestContext::child_of(&self.shutdown).timeout(self.request_timeout)
    }
}

/// Body of `GET /stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub cache_len: usize,
    pub cache_size_limit: usize,
    #[serde(flatten)]
    pub engine: EngineStatistics,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tribonacci/:n", get(tribonacci))
        .route("/health", get(health))
        .route("/stats", get(stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /tribonacci/:n`
async fn tribonacci(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<TriboValue>, ApiError> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|e| ApiError::bad_request(format!("Invalid index '{}': {}", raw, e)))?;

    let ctx = state.request_context();
    let value = state.tribo.get(&ctx, n).await?;
    Ok(Json(value))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        cache_len: state.tribo.cache_len(),
        cache_size_limit: state.tribo.cache_size_limit(),
        engine: state.tribo.statistics(),
    })
}
