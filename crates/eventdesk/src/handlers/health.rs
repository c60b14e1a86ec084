//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Cache stats (fast, passive)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::state::AppState;
use crate::storage::CacheStats;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    #[serde(flatten)]
    pub cache: CacheStats,
    pub entries: usize,
}

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Cache hit/miss counters and current entry count.
///
/// Returns 503 if the cache store cannot be queried.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    let cache = state.aside.stats();

    match state.cache.entry_count().await {
        Ok(entries) => (
            StatusCode::OK,
            Json(HealthStatus { cache, entries }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}
