//! Maps passport outcomes to HTTP responses.
//!
//! Domain rejections are reported as HTTP 200 with `success = false` in
//! the envelope. Only backend failures change the status line: 503 for
//! retryable ones, 500 otherwise.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use warden_auth::error::PassportError;
use warden_core::error::AppError;

use crate::dto::response::ApiResponse;

/// Error returned by handlers and extractors.
#[derive(Debug)]
pub struct ApiError(pub PassportError);

impl ApiError {
    /// Shortcut for an input validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(PassportError::Validation(message.into()))
    }

    /// HTTP status used for this error.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PassportError::Backend(e) if e.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            PassportError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }
}

impl From<PassportError> for ApiError {
    fn from(err: PassportError) -> Self {
        Self(err)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(PassportError::Backend(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let PassportError::Backend(e) = &self.0 {
            tracing::error!(kind = %e.kind, error = %e, "Backend failure while serving request");
        }

        let body = ApiResponse::failure(self.0.code(), self.0.public_message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_200() {
        assert_eq!(ApiError(PassportError::TokenRevoked).status(), StatusCode::OK);
        assert_eq!(ApiError::validation("x").status(), StatusCode::OK);
    }

    #[test]
    fn test_backend_errors_change_status() {
        assert_eq!(
            ApiError::from(AppError::timeout("slow")).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(AppError::signing("bad")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
