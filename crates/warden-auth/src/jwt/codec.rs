//! HMAC-signed token issuance and verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use warden_core::config::PassportConfig;
use warden_core::error::AppError;

use super::claims::ClaimSet;
use crate::error::PassportError;

/// A freshly signed token together with its timing claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact serialized token.
    pub token: String,
    /// Issued-at timestamp (seconds since epoch).
    pub issued_at: i64,
    /// Expiration timestamp (seconds since epoch).
    pub expires_at: i64,
}

/// Issues and verifies tokens with a shared HMAC secret.
///
/// Verification checks, in order: structure, signature, expiry (with the
/// configured leeway) and finally the role tag.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from passport configuration.
    pub fn new(config: &PassportConfig) -> Result<Self, AppError> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration("Token signing secret must not be empty"));
        }
        let algorithm = parse_algorithm(&config.jwt_algorithm)?;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(algorithm),
            validation,
        })
    }

    /// Signs a token for `subject` tagged with `role_tag`, valid for
    /// `ttl_seconds` from now.
    pub fn issue(
        &self,
        subject: &str,
        role_tag: &str,
        ttl_seconds: u64,
    ) -> Result<IssuedToken, AppError> {
        self.issue_at(subject, role_tag, ttl_seconds, Utc::now())
    }

    /// Signs a token as if issued at `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        role_tag: &str,
        ttl_seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let ttl = i64::try_from(ttl_seconds)
            .map_err(|_| AppError::configuration("Token lifetime is out of range"))?;
        let iat = now.timestamp();
        let exp = iat.saturating_add(ttl);

        let claims = ClaimSet {
            sub: subject.to_string(),
            iat,
            exp,
            jti: Uuid::new_v4(),
            role_tag: role_tag.to_string(),
        };

        let token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::signing(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken {
            token,
            issued_at: iat,
            expires_at: exp,
        })
    }

    /// Verifies a token and checks that it carries `expected_role_tag`.
    ///
    /// Does not consult the revocation store.
    pub fn verify(&self, token: &str, expected_role_tag: &str) -> Result<ClaimSet, PassportError> {
        let data = decode::<ClaimSet>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    PassportError::TokenInvalidSignature
                }
                JwtErrorKind::ExpiredSignature => PassportError::TokenExpired,
                _ => PassportError::TokenMalformed,
            },
        )?;

        if data.claims.role_tag != expected_role_tag {
            return Err(PassportError::TokenRoleMismatch);
        }

        Ok(data.claims)
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, AppError> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AppError::configuration(format!(
            "Unsupported token algorithm '{other}'"
        ))),
    }
}
