//! `CurrentAdmin` extractor: pulls the bearer token from the
//! Authorization header and resolves it to the calling admin.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use warden_auth::error::PassportError;
use warden_auth::session::CurrentIdentity;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin available in handlers.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub CurrentIdentity);

impl std::ops::Deref for CurrentAdmin {
    type Target = CurrentIdentity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(PassportError::Unauthenticated)?;
        let identity = state.session_manager.authenticate(token).await?;
        Ok(CurrentAdmin(identity))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
