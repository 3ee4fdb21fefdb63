//! Route definitions for the Warden HTTP API.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, threading `AppState` through
/// `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(passport_routes())
        .merge(health_routes())
        .with_state(state)
}

fn passport_routes() -> Router<AppState> {
    Router::new()
        .route("/captcha", get(handlers::passport::captcha))
        .route("/login", post(handlers::passport::login))
        .route("/refresh-token", post(handlers::passport::refresh_token))
        .route("/logout", post(handlers::passport::logout))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
