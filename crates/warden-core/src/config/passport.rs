//! Login, token and captcha configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Signing algorithms accepted for `jwt_algorithm`.
pub const SUPPORTED_JWT_ALGORITHMS: &[&str] = &["HS256", "HS384", "HS512"];

/// Digest algorithms accepted for `password_algorithm`.
pub const SUPPORTED_PASSWORD_ALGORITHMS: &[&str] = &["sha256", "sha512"];

/// Passport configuration: credential hashing, token issuance and captcha.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassportConfig {
    /// Secret key for token signing (HMAC).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// HMAC variant used for signing: `HS256`, `HS384` or `HS512`.
    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,
    /// Clock-skew leeway applied to expiry checks, in seconds.
    #[serde(default)]
    pub leeway_seconds: u64,
    /// Role tag carried by access tokens.
    #[serde(default = "default_access_token_id")]
    pub access_token_id: String,
    /// Role tag carried by refresh tokens.
    #[serde(default = "default_refresh_token_id")]
    pub refresh_token_id: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_expires_in")]
    pub access_expires_in: u64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_expires_in")]
    pub refresh_expires_in: u64,
    /// Global salt mixed into every server-side password digest.
    #[serde(default)]
    pub password_salt: String,
    /// Digest used for server-side password hashing: `sha256` or `sha512`.
    #[serde(default = "default_password_algorithm")]
    pub password_algorithm: String,
    /// Request/response header carrying the captcha correlation id.
    #[serde(default = "default_captcha_header")]
    pub captcha_header: String,
    /// Number of characters in a captcha code.
    #[serde(default = "default_captcha_length")]
    pub captcha_length: usize,
    /// How long an unanswered captcha stays valid, in seconds.
    #[serde(default = "default_captcha_ttl")]
    pub captcha_ttl_seconds: u64,
}

impl Default for PassportConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_algorithm: default_jwt_algorithm(),
            leeway_seconds: 0,
            access_token_id: default_access_token_id(),
            refresh_token_id: default_refresh_token_id(),
            access_expires_in: default_access_expires_in(),
            refresh_expires_in: default_refresh_expires_in(),
            password_salt: String::new(),
            password_algorithm: default_password_algorithm(),
            captcha_header: default_captcha_header(),
            captcha_length: default_captcha_length(),
            captcha_ttl_seconds: default_captcha_ttl(),
        }
    }
}

impl PassportConfig {
    /// Rejects configurations the token and credential flows cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("passport.jwt_secret must not be empty"));
        }
        if !SUPPORTED_JWT_ALGORITHMS.contains(&self.jwt_algorithm.as_str()) {
            return Err(AppError::configuration(format!(
                "Unsupported passport.jwt_algorithm '{}'. Supported: {}",
                self.jwt_algorithm,
                SUPPORTED_JWT_ALGORITHMS.join(", ")
            )));
        }
        if !SUPPORTED_PASSWORD_ALGORITHMS.contains(&self.password_algorithm.as_str()) {
            return Err(AppError::configuration(format!(
                "Unsupported passport.password_algorithm '{}'. Supported: {}",
                self.password_algorithm,
                SUPPORTED_PASSWORD_ALGORITHMS.join(", ")
            )));
        }
        if self.access_token_id.is_empty() || self.refresh_token_id.is_empty() {
            return Err(AppError::configuration(
                "passport.access_token_id and passport.refresh_token_id must not be empty",
            ));
        }
        if self.access_token_id == self.refresh_token_id {
            return Err(AppError::configuration(
                "passport.access_token_id and passport.refresh_token_id must differ",
            ));
        }
        if self.access_expires_in == 0 || self.refresh_expires_in == 0 {
            return Err(AppError::configuration(
                "Token lifetimes must be greater than zero",
            ));
        }
        if self.captcha_length == 0 {
            return Err(AppError::configuration(
                "passport.captcha_length must be greater than zero",
            ));
        }
        if self.captcha_header.is_empty() {
            return Err(AppError::configuration(
                "passport.captcha_header must not be empty",
            ));
        }
        Ok(())
    }

    /// Whether refresh tokens expire before the access tokens they mint.
    ///
    /// This is the shipped default (300s vs 86400s) and is usually a
    /// misconfiguration; startup logs a warning when it holds.
    pub fn refresh_outlived_by_access(&self) -> bool {
        self.refresh_expires_in < self.access_expires_in
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_id() -> String {
    "access".to_string()
}

fn default_refresh_token_id() -> String {
    "refresh".to_string()
}

fn default_access_expires_in() -> u64 {
    86400
}

fn default_refresh_expires_in() -> u64 {
    300
}

fn default_password_algorithm() -> String {
    "sha256".to_string()
}

fn default_captcha_header() -> String {
    "X-Captcha-Id".to_string()
}

fn default_captcha_length() -> usize {
    4
}

fn default_captcha_ttl() -> u64 {
    300
}
