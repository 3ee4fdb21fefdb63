//! # warden-api
//!
//! HTTP API layer for Warden built on Axum.
//!
//! Provides the passport endpoints (captcha, login, token refresh,
//! logout), the health probe, middleware (request logging, CORS),
//! extractors, DTOs, and error mapping into the response envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
