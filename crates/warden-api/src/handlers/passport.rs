//! Passport handlers: captcha, login, refresh-token, logout.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::IntoResponse;

use warden_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshTokenRequest};
use crate::dto::response::{ApiResponse, CaptchaResponse, LoginResponse, RefreshResponse};
use crate::error::ApiError;
use crate::extractors::{CurrentAdmin, JsonBody};
use crate::state::AppState;

/// GET /captcha
pub async fn captcha(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let challenge = state.captcha.generate().await?;

    let name = HeaderName::try_from(state.captcha_header())
        .map_err(|e| AppError::configuration(format!("Invalid captcha header name: {e}")))?;
    let value = HeaderValue::try_from(challenge.correlation_id.as_str())
        .map_err(|e| AppError::internal(format!("Invalid captcha id: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(name, value);

    Ok((
        headers,
        Json(ApiResponse::ok(
            "Captcha issued",
            CaptchaResponse {
                captcha_image: challenge.image,
            },
        )),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let captcha_id = headers
        .get(state.captcha_header())
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let pair = state.session_manager.login(&req.into_input(captcha_id)).await?;

    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            access_token: pair.access_token,
            expires_in: pair.expires_in,
            refresh_token: pair.refresh_token,
        },
    )))
}

/// POST /refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RefreshTokenRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    let refreshed = state.session_manager.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(
        "Token refreshed",
        RefreshResponse {
            access_token: refreshed.access_token,
            expires_in: refreshed.expires_in,
        },
    )))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    admin: CurrentAdmin,
    JsonBody(req): JsonBody<RefreshTokenRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .session_manager
        .logout(&req.refresh_token, &admin)
        .await?;

    Ok(Json(ApiResponse::message("Logged out")))
}
