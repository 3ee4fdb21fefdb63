//! The authenticated caller and the token bundles handed back to it.

/// Admin identified by a verified, non-revoked access token.
#[derive(Clone, PartialEq, Eq)]
pub struct CurrentIdentity {
    /// Subject of the access token.
    pub admin_id: String,
    /// The raw access token the caller presented.
    pub access_token: String,
}

impl std::fmt::Debug for CurrentIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentIdentity")
            .field("admin_id", &self.admin_id)
            .finish_non_exhaustive()
    }
}

/// Access and refresh tokens issued together at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Access token.
    pub access_token: String,
    /// Refresh token for the same subject.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// New access token minted from a refresh token.
#[derive(Debug, Clone)]
pub struct RefreshedToken {
    /// Access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}
