//! Outcomes of the passport flows.
//!
//! Every rejection the flows can produce is a variant here with its own
//! numeric code. Collaborator failures (cache, directory, signing) are
//! wrapped in [`PassportError::Backend`] and are the only retryable kind.

use thiserror::Error;

use warden_core::error::AppError;

/// Why a credential check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMismatch {
    /// No admin with the submitted name exists.
    UnknownAccount,
    /// The admin exists but the password digest does not match.
    WrongPassword,
}

/// Errors returned by login, refresh, logout and bearer authentication.
#[derive(Debug, Error)]
pub enum PassportError {
    /// Request input failed a shape rule.
    #[error("{0}")]
    Validation(String),
    /// The captcha answer was wrong, expired or already used.
    #[error("Captcha is incorrect")]
    CaptchaMismatch,
    /// Account name or password did not match.
    #[error("{}", match .0 {
        CredentialMismatch::UnknownAccount => "Account does not exist",
        CredentialMismatch::WrongPassword => "Account or password is incorrect",
    })]
    CredentialMismatch(CredentialMismatch),
    /// The account exists and the password matched, but it is disabled.
    #[error("Account is disabled")]
    AccountDisabled,
    /// The token could not be decoded.
    #[error("Token is malformed")]
    TokenMalformed,
    /// The token signature did not verify.
    #[error("Token signature is invalid")]
    TokenInvalidSignature,
    /// The token is past its expiry.
    #[error("Token has expired")]
    TokenExpired,
    /// The token carries a different role tag than the one expected.
    #[error("Token type is not accepted here")]
    TokenRoleMismatch,
    /// The token was blacklisted by a logout.
    #[error("Token has been revoked")]
    TokenRevoked,
    /// The refresh token belongs to a different admin than the caller.
    #[error("Refresh token does not belong to the current admin")]
    IdentityMismatch,
    /// No bearer access token was presented.
    #[error("Missing or malformed Authorization header")]
    Unauthenticated,
    /// A collaborator (cache, directory, signer) failed.
    #[error("Backend failure: {0}")]
    Backend(#[from] AppError),
}

impl PassportError {
    /// Stable numeric code reported in the response envelope.
    pub fn code(&self) -> u32 {
        match self {
            Self::Validation(_) => 10001,
            Self::CaptchaMismatch => 10002,
            Self::CredentialMismatch(_) => 10003,
            Self::AccountDisabled => 10004,
            Self::Unauthenticated => 10100,
            Self::TokenMalformed => 10101,
            Self::TokenInvalidSignature => 10102,
            Self::TokenExpired => 10103,
            Self::TokenRoleMismatch => 10104,
            Self::TokenRevoked => 10105,
            Self::IdentityMismatch => 10106,
            Self::Backend(_) => 50000,
        }
    }

    /// Whether the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Backend(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Message safe to show to the caller.
    ///
    /// Backend details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Backend(e) if e.is_retryable() => {
                "Service temporarily unavailable, please retry".to_string()
            }
            Self::Backend(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
