//! Cache-backed blacklist of logged-out tokens.

use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::debug;

use warden_cache::CacheManager;
use warden_cache::keys;
use warden_core::result::AppResult;
use warden_core::traits::CacheProvider;

/// Marker value stored for a logged-out token.
pub const LOGGED_OUT_MARKER: &str = "out";

/// Deterministic fingerprint of a serialized token (hex SHA-256).
pub fn fingerprint(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Blacklist of token fingerprints with per-entry expiry.
///
/// Entries only need to outlive the token they block, so every write
/// carries a TTL. Cache failures are propagated; a failed lookup is
/// never treated as "not revoked".
///
/// The backing cache must never evict for space: build it with
/// [`CacheManager::new_unbounded`] rather than sharing the size-bounded
/// cache that holds captchas.
#[derive(Debug, Clone)]
pub struct RevocationStore {
    cache: Arc<CacheManager>,
}

impl RevocationStore {
    /// Creates a store over a cache bounded only by entry TTL.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Whether `fingerprint` is currently blacklisted.
    pub async fn has(&self, fingerprint: &str) -> AppResult<bool> {
        self.cache.exists(&keys::revoked_token(fingerprint)).await
    }

    /// Blacklists `fingerprint` for `ttl`.
    ///
    /// Idempotent: an existing entry is left untouched.
    pub async fn add(&self, fingerprint: &str, marker: &str, ttl: Duration) -> AppResult<()> {
        let ttl = ttl.max(Duration::from_secs(1));
        let inserted = self
            .cache
            .set_nx(&keys::revoked_token(fingerprint), marker, ttl)
            .await?;
        if !inserted {
            debug!(fingerprint = %fingerprint, "Token already revoked");
        }
        Ok(())
    }

    /// Whether the serialized `token` is blacklisted.
    pub async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        self.has(&fingerprint(token)).await
    }

    /// Blacklists the serialized `token` as logged out.
    pub async fn revoke(&self, token: &str, ttl: Duration) -> AppResult<()> {
        self.add(&fingerprint(token), LOGGED_OUT_MARKER, ttl).await
    }
}
