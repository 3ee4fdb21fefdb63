//! Health check handler.

use axum::Json;
use axum::extract::State;

use warden_core::traits::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let cache_ok = state.cache.health_check().await.unwrap_or(false);

    Json(ApiResponse::ok(
        "ok",
        HealthResponse {
            status: if cache_ok { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            cache: if cache_ok { "connected" } else { "unreachable" }.to_string(),
        },
    ))
}
