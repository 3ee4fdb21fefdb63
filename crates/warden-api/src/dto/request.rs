//! Request DTOs.
//!
//! Missing fields deserialize as empty strings so that shape problems
//! surface as login validation errors rather than body rejections.

use serde::{Deserialize, Serialize};

use warden_auth::credential::LoginInput;

/// Login request body. The captcha id travels in a request header.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Account name.
    pub name: String,
    /// Client-side password digest.
    pub password: String,
    /// Captcha answer.
    pub captcha: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl LoginRequest {
    /// Combines the body with the captcha id taken from the header.
    pub fn into_input(self, captcha_id: String) -> LoginInput {
        LoginInput {
            name: self.name,
            password: self.password,
            captcha: self.captcha,
            captcha_id,
        }
    }
}

/// Body carrying a refresh token (refresh and logout).
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshTokenRequest {
    /// Refresh token.
    pub refresh_token: String,
}

impl std::fmt::Debug for RefreshTokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenRequest").finish_non_exhaustive()
    }
}
