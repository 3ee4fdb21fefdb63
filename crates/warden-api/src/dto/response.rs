//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Code reported on every successful response.
pub const SUCCESS_CODE: u32 = 0;

/// Envelope wrapping every response body.
///
/// Failures carry `success = false`, a non-zero `code` and no `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Machine-readable result code.
    pub code: u32,
    /// Human-readable message.
    pub message: String,
    /// Response data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            code: SUCCESS_CODE,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Creates a successful response without data.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: SUCCESS_CODE,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a failure response.
    pub fn failure(code: u32, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Captcha response. The correlation id travels in a response header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaResponse {
    /// Rendered captcha image as a `data:` URI.
    pub captcha_image: String,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// Refresh token.
    pub refresh_token: String,
}

/// Token refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Cache backend status.
    pub cache: String,
}
