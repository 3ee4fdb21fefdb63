//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use warden_auth::captcha::CaptchaService;
use warden_auth::session::SessionManager;
use warden_cache::CacheManager;
use warden_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// Login, refresh, logout and bearer authentication
    pub session_manager: Arc<SessionManager>,
    /// Captcha issuance
    pub captcha: Arc<dyn CaptchaService>,
}

impl AppState {
    /// Name of the header carrying the captcha correlation id.
    pub fn captcha_header(&self) -> &str {
        &self.config.passport.captcha_header
    }
}
