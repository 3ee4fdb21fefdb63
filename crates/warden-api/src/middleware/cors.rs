//! CORS layer configuration.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use warden_core::config::app::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// The captcha header is exposed so browser clients can read the
/// correlation id from the `/captcha` response.
pub fn build_cors_layer(config: &CorsConfig, captcha_header: &str) -> CorsLayer {
    let mut layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(config.max_age_seconds));

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    if let Ok(name) = HeaderName::try_from(captcha_header) {
        layer = layer.expose_headers([name]);
    }

    layer
}
