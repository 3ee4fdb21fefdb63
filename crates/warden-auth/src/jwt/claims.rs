//! Claim set carried by access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every token Warden issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Subject, the admin identifier.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID so two tokens issued in the same second differ.
    pub jti: Uuid,
    /// Role tag distinguishing access tokens from refresh tokens.
    #[serde(rename = "token_type")]
    pub role_tag: String,
}

impl ClaimSet {
    /// Full lifetime of the token in seconds (`exp - iat`).
    pub fn lifetime_seconds(&self) -> u64 {
        u64::try_from(self.exp - self.iat).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tag_serialized_as_token_type() {
        let claims = ClaimSet {
            sub: "7".into(),
            iat: 100,
            exp: 400,
            jti: Uuid::new_v4(),
            role_tag: "refresh".into(),
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["token_type"], "refresh");
        assert_eq!(claims.lifetime_seconds(), 300);
    }

    #[test]
    fn test_negative_lifetime_clamps_to_zero() {
        let claims = ClaimSet {
            sub: "7".into(),
            iat: 400,
            exp: 100,
            jti: Uuid::new_v4(),
            role_tag: "access".into(),
        };
        assert_eq!(claims.lifetime_seconds(), 0);
    }
}
