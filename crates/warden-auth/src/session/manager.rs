//! Session lifecycle manager: login, refresh, logout and bearer checks.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use warden_core::config::PassportConfig;
use warden_core::events::PassportEvent;

use super::identity::{CurrentIdentity, RefreshedToken, TokenPair};
use crate::credential::{CredentialValidator, LoginInput};
use crate::error::PassportError;
use crate::events::EventDispatcher;
use crate::jwt::{ClaimSet, TokenCodec};
use crate::revocation::RevocationStore;

/// Runs the token lifecycle for admin sessions.
///
/// A token's effective state is derived at use time from three
/// independent signals: signature, expiry, and presence of its
/// fingerprint in the revocation store. Every flow that accepts a token
/// checks all three.
#[derive(Clone)]
pub struct SessionManager {
    credentials: CredentialValidator,
    codec: Arc<TokenCodec>,
    revocations: RevocationStore,
    events: EventDispatcher,
    access_token_id: String,
    refresh_token_id: String,
    access_expires_in: u64,
    refresh_expires_in: u64,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("access_token_id", &self.access_token_id)
            .field("refresh_token_id", &self.refresh_token_id)
            .field("access_expires_in", &self.access_expires_in)
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager with all required collaborators.
    pub fn new(
        config: &PassportConfig,
        credentials: CredentialValidator,
        codec: Arc<TokenCodec>,
        revocations: RevocationStore,
        events: EventDispatcher,
    ) -> Self {
        Self {
            credentials,
            codec,
            revocations,
            events,
            access_token_id: config.access_token_id.clone(),
            refresh_token_id: config.refresh_token_id.clone(),
            access_expires_in: config.access_expires_in,
            refresh_expires_in: config.refresh_expires_in,
        }
    }

    /// The codec used to sign and verify tokens.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Validates credentials and issues an access/refresh pair.
    ///
    /// Emits `LoginAttempted` before validation and `LoggedIn` only on
    /// success.
    pub async fn login(&self, input: &LoginInput) -> Result<TokenPair, PassportError> {
        self.events
            .emit(
                None,
                PassportEvent::LoginAttempted {
                    name: input.name.clone(),
                },
            )
            .await;

        let admin = match self.credentials.validate(input).await {
            Ok(admin) => admin,
            Err(e) => {
                warn!(name = %input.name, code = e.code(), reason = %e, "Login rejected");
                return Err(e);
            }
        };

        let access = self
            .codec
            .issue(&admin.id, &self.access_token_id, self.access_expires_in)?;
        let refresh = self
            .codec
            .issue(&admin.id, &self.refresh_token_id, self.refresh_expires_in)?;

        info!(admin_id = %admin.id, name = %admin.name, "Admin logged in");

        self.events
            .emit(
                Some(admin.id.clone()),
                PassportEvent::LoggedIn {
                    admin_id: admin.id.clone(),
                    name: admin.name.clone(),
                },
            )
            .await;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            expires_in: self.access_expires_in,
        })
    }

    /// Mints a new access token from a refresh token.
    ///
    /// The refresh token itself is not rotated; it stays usable until it
    /// expires or is logged out.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedToken, PassportError> {
        if refresh_token.is_empty() {
            return Err(PassportError::Validation(
                "Refresh token is required".to_string(),
            ));
        }

        self.ensure_not_revoked(refresh_token).await?;
        let claims = self.codec.verify(refresh_token, &self.refresh_token_id)?;

        let access = self
            .codec
            .issue(&claims.sub, &self.access_token_id, self.access_expires_in)?;

        info!(admin_id = %claims.sub, "Access token refreshed");

        self.events
            .emit(
                Some(claims.sub.clone()),
                PassportEvent::TokenRefreshed {
                    admin_id: claims.sub,
                },
            )
            .await;

        Ok(RefreshedToken {
            access_token: access.token,
            expires_in: self.access_expires_in,
        })
    }

    /// Blacklists the caller's access token and the given refresh token.
    ///
    /// Both entries live for the refresh token's full lifetime
    /// (`exp - iat`).
    pub async fn logout(
        &self,
        refresh_token: &str,
        identity: &CurrentIdentity,
    ) -> Result<(), PassportError> {
        if refresh_token.is_empty() {
            return Err(PassportError::Validation(
                "Refresh token is required".to_string(),
            ));
        }

        self.ensure_not_revoked(refresh_token).await?;
        self.ensure_not_revoked(&identity.access_token).await?;

        let claims = self.codec.verify(refresh_token, &self.refresh_token_id)?;
        if claims.sub != identity.admin_id {
            warn!(
                admin_id = %identity.admin_id,
                token_subject = %claims.sub,
                "Logout with another admin's refresh token"
            );
            return Err(PassportError::IdentityMismatch);
        }

        let ttl = revocation_ttl(&claims);
        self.revocations.revoke(&identity.access_token, ttl).await?;
        self.revocations.revoke(refresh_token, ttl).await?;

        info!(admin_id = %claims.sub, ttl_secs = ttl.as_secs(), "Admin logged out");

        self.events
            .emit(
                Some(claims.sub.clone()),
                PassportEvent::LoggedOut {
                    admin_id: claims.sub,
                },
            )
            .await;

        Ok(())
    }

    /// Resolves a bearer access token to the calling admin.
    pub async fn authenticate(&self, access_token: &str) -> Result<CurrentIdentity, PassportError> {
        if access_token.is_empty() {
            return Err(PassportError::Unauthenticated);
        }

        self.ensure_not_revoked(access_token).await?;
        let claims = self.codec.verify(access_token, &self.access_token_id)?;

        Ok(CurrentIdentity {
            admin_id: claims.sub,
            access_token: access_token.to_string(),
        })
    }

    async fn ensure_not_revoked(&self, token: &str) -> Result<(), PassportError> {
        if self.revocations.is_revoked(token).await? {
            return Err(PassportError::TokenRevoked);
        }
        Ok(())
    }
}

fn revocation_ttl(claims: &ClaimSet) -> Duration {
    Duration::from_secs(claims.lifetime_seconds().max(1))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::broadcast;

    use warden_cache::CacheManager;
    use warden_cache::keys;
    use warden_cache::memory::MemoryCacheProvider;
    use warden_core::config::cache::MemoryCacheConfig;
    use warden_core::error::AppError;
    use warden_core::events::DomainEvent;
    use warden_core::result::AppResult;
    use warden_core::traits::CacheProvider;
    use warden_core::types::{AdminCredential, AdminStatus};
    use warden_database::MemoryAdminDirectory;

    use super::*;
    use crate::captcha::CacheCaptchaService;
    use crate::credential::LoginRules;
    use crate::events::ChannelListener;
    use crate::password::PasswordHasher;
    use crate::revocation::fingerprint;

    const DIGEST: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

    /// Records the TTL of every `set_nx` write.
    #[derive(Debug)]
    struct RecordingCache {
        inner: MemoryCacheProvider,
        set_nx_ttls: Mutex<Vec<(String, Duration)>>,
    }

    #[async_trait]
    impl CacheProvider for RecordingCache {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
            self.inner.set(key, value, ttl).await
        }

        async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
            self.set_nx_ttls.lock().unwrap().push((key.to_string(), ttl));
            self.inner.set_nx(key, value, ttl).await
        }

        async fn take(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.take(key).await
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            self.inner.delete(key).await
        }

        async fn exists(&self, key: &str) -> AppResult<bool> {
            self.inner.exists(key).await
        }

        async fn health_check(&self) -> AppResult<bool> {
            self.inner.health_check().await
        }
    }

    /// Cache whose lookups always time out.
    #[derive(Debug)]
    struct UnreachableCache;

    #[async_trait]
    impl CacheProvider for UnreachableCache {
        async fn get(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::timeout("cache get timed out"))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
            Err(AppError::timeout("cache set timed out"))
        }

        async fn set_nx(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<bool> {
            Err(AppError::timeout("cache set_nx timed out"))
        }

        async fn take(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::timeout("cache take timed out"))
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            Err(AppError::timeout("cache delete timed out"))
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Err(AppError::timeout("cache exists timed out"))
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }
    }

    struct Harness {
        manager: SessionManager,
        cache: Arc<CacheManager>,
        recorder: Arc<RecordingCache>,
        events: broadcast::Receiver<DomainEvent>,
    }

    fn config() -> PassportConfig {
        PassportConfig {
            jwt_secret: "session-test-secret".into(),
            password_salt: "global".into(),
            ..PassportConfig::default()
        }
    }

    fn directory(hasher: &PasswordHasher) -> MemoryAdminDirectory {
        let directory = MemoryAdminDirectory::new();
        for (id, name, status) in [
            ("1", "admin", AdminStatus::Enabled),
            ("2", "auditor", AdminStatus::Enabled),
            ("3", "retired", AdminStatus::Disabled),
        ] {
            directory.insert(AdminCredential {
                id: id.into(),
                name: name.into(),
                password_hash: hasher.hash_password(DIGEST, "salt"),
                password_salt: "salt".into(),
                status,
            });
        }
        directory
    }

    fn build(
        config: PassportConfig,
        provider: Arc<dyn CacheProvider>,
        events: EventDispatcher,
    ) -> (SessionManager, Arc<CacheManager>) {
        let cache = Arc::new(CacheManager::from_provider(provider));
        let hasher = PasswordHasher::from_config(&config).unwrap();
        let credentials = CredentialValidator::new(
            LoginRules::new(config.captcha_length),
            Arc::new(CacheCaptchaService::from_config(cache.clone(), &config)),
            Arc::new(directory(&hasher)),
            hasher,
        );
        let manager = SessionManager::new(
            &config,
            credentials,
            Arc::new(TokenCodec::new(&config).unwrap()),
            RevocationStore::new(cache.clone()),
            events,
        );
        (manager, cache)
    }

    fn harness() -> Harness {
        let recorder = Arc::new(RecordingCache {
            inner: MemoryCacheProvider::new(&MemoryCacheConfig::default()),
            set_nx_ttls: Mutex::new(Vec::new()),
        });
        let channel = ChannelListener::new(32);
        let events = channel.subscribe();
        let (manager, cache) = build(
            config(),
            recorder.clone(),
            EventDispatcher::new().with_listener(Arc::new(channel)),
        );
        Harness {
            manager,
            cache,
            recorder,
            events,
        }
    }

    impl Harness {
        async fn seed_captcha(&self, id: &str, code: &str) {
            self.cache
                .set(&keys::captcha(id), &code.to_ascii_lowercase(), Duration::from_secs(60))
                .await
                .unwrap();
        }

        async fn login_as(&self, name: &str) -> Result<TokenPair, PassportError> {
            self.seed_captcha("c1", "AB12").await;
            self.manager
                .login(&LoginInput {
                    name: name.into(),
                    password: DIGEST.into(),
                    captcha: "AB12".into(),
                    captcha_id: "c1".into(),
                })
                .await
        }

        fn drain_events(&mut self) -> Vec<PassportEvent> {
            let mut out = Vec::new();
            while let Ok(event) = self.events.try_recv() {
                out.push(event.payload);
            }
            out
        }
    }

    #[tokio::test]
    async fn test_login_pair_shares_subject_and_role_tags() {
        let h = harness();
        let pair = h.login_as("admin").await.unwrap();
        assert_eq!(pair.expires_in, 86400);

        let codec = h.manager.codec();
        let access = codec.verify(&pair.access_token, "access").unwrap();
        let refresh = codec.verify(&pair.refresh_token, "refresh").unwrap();
        assert_eq!(access.sub, "1");
        assert_eq!(access.sub, refresh.sub);
        assert_eq!(access.exp - access.iat, 86400);
        assert_eq!(refresh.exp - refresh.iat, 300);
    }

    #[tokio::test]
    async fn test_login_emits_attempt_then_success() {
        let mut h = harness();
        h.login_as("admin").await.unwrap();
        assert_eq!(
            h.drain_events(),
            vec![
                PassportEvent::LoginAttempted {
                    name: "admin".into()
                },
                PassportEvent::LoggedIn {
                    admin_id: "1".into(),
                    name: "admin".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_disabled_account_gets_no_tokens_and_no_success_event() {
        let mut h = harness();
        let err = h.login_as("retired").await.unwrap_err();
        assert!(matches!(err, PassportError::AccountDisabled));
        assert_eq!(
            h.drain_events(),
            vec![PassportEvent::LoginAttempted {
                name: "retired".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_captcha_is_consumed_by_login() {
        let h = harness();
        h.login_as("admin").await.unwrap();
        let err = h
            .manager
            .login(&LoginInput {
                name: "admin".into(),
                password: DIGEST.into(),
                captcha: "AB12".into(),
                captcha_id: "c1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PassportError::CaptchaMismatch));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_for_same_subject() {
        let mut h = harness();
        let pair = h.login_as("admin").await.unwrap();
        let original = h.manager.codec().verify(&pair.access_token, "access").unwrap();

        let refreshed = h.manager.refresh(&pair.refresh_token).await.unwrap();
        assert_ne!(refreshed.access_token, pair.access_token);
        assert_eq!(refreshed.expires_in, 86400);

        let claims = h
            .manager
            .codec()
            .verify(&refreshed.access_token, "access")
            .unwrap();
        assert_eq!(claims.sub, original.sub);
        assert!(claims.iat >= original.iat);
        assert_ne!(claims.jti, original.jti);

        // The refresh token is not rotated.
        assert!(h.manager.refresh(&pair.refresh_token).await.is_ok());
        assert!(h.drain_events().contains(&PassportEvent::TokenRefreshed {
            admin_id: "1".into()
        }));
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let h = harness();
        let pair = h.login_as("admin").await.unwrap();
        let err = h.manager.refresh(&pair.access_token).await.unwrap_err();
        assert!(matches!(err, PassportError::TokenRoleMismatch));
    }

    #[tokio::test]
    async fn test_refresh_rejects_empty_and_garbage() {
        let h = harness();
        assert!(matches!(
            h.manager.refresh("").await,
            Err(PassportError::Validation(_))
        ));
        assert!(matches!(
            h.manager.refresh("garbage").await,
            Err(PassportError::TokenMalformed)
        ));
    }

    #[tokio::test]
    async fn test_logout_revokes_both_tokens() {
        let h = harness();
        let pair = h.login_as("admin").await.unwrap();
        let refreshed = h.manager.refresh(&pair.refresh_token).await.unwrap();
        let identity = h.manager.authenticate(&refreshed.access_token).await.unwrap();
        assert_eq!(identity.admin_id, "1");

        h.manager.logout(&pair.refresh_token, &identity).await.unwrap();

        assert!(matches!(
            h.manager.refresh(&pair.refresh_token).await,
            Err(PassportError::TokenRevoked)
        ));
        assert!(matches!(
            h.manager.refresh(&refreshed.access_token).await,
            Err(PassportError::TokenRevoked)
        ));
        assert!(matches!(
            h.manager.logout(&pair.refresh_token, &identity).await,
            Err(PassportError::TokenRevoked)
        ));
        assert!(matches!(
            h.manager.authenticate(&refreshed.access_token).await,
            Err(PassportError::TokenRevoked)
        ));

        // Still time-valid when the revocation store is ignored.
        let codec = h.manager.codec();
        assert!(codec.verify(&pair.refresh_token, "refresh").is_ok());
        assert!(codec.verify(&refreshed.access_token, "access").is_ok());

        // Tokens from the untouched login stay usable.
        assert!(h.manager.authenticate(&pair.access_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_revocation_ttl_is_refresh_lifetime() {
        let h = harness();
        let pair = h.login_as("admin").await.unwrap();
        let identity = h.manager.authenticate(&pair.access_token).await.unwrap();
        h.manager.logout(&pair.refresh_token, &identity).await.unwrap();

        let claims = h.manager.codec().verify(&pair.refresh_token, "refresh").unwrap();
        let expected = Duration::from_secs((claims.exp - claims.iat) as u64);

        let writes = h.recorder.set_nx_ttls.lock().unwrap().clone();
        let written: Vec<_> = writes.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            written,
            vec![
                keys::revoked_token(&fingerprint(&pair.access_token)),
                keys::revoked_token(&fingerprint(&pair.refresh_token)),
            ]
        );
        assert!(writes.iter().all(|(_, ttl)| *ttl == expected));
        assert_eq!(expected, Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_logout_with_foreign_refresh_token() {
        let h = harness();
        let admin = h.login_as("admin").await.unwrap();
        let auditor = h.login_as("auditor").await.unwrap();
        let identity = h.manager.authenticate(&auditor.access_token).await.unwrap();

        let err = h
            .manager
            .logout(&admin.refresh_token, &identity)
            .await
            .unwrap_err();
        assert!(matches!(err, PassportError::IdentityMismatch));
        assert!(h.manager.refresh(&admin.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_requires_refresh_role() {
        let h = harness();
        let pair = h.login_as("admin").await.unwrap();
        let identity = h.manager.authenticate(&pair.access_token).await.unwrap();
        let err = h
            .manager
            .logout(&pair.access_token, &identity)
            .await
            .unwrap_err();
        assert!(matches!(err, PassportError::TokenRoleMismatch));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_refresh_token_and_empty() {
        let h = harness();
        let pair = h.login_as("admin").await.unwrap();
        assert!(matches!(
            h.manager.authenticate(&pair.refresh_token).await,
            Err(PassportError::TokenRoleMismatch)
        ));
        assert!(matches!(
            h.manager.authenticate("").await,
            Err(PassportError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_expired_refresh_token() {
        let h = harness();
        let stale = h
            .manager
            .codec()
            .issue_at(
                "1",
                "refresh",
                300,
                chrono::Utc::now() - chrono::Duration::seconds(3600),
            )
            .unwrap();
        assert!(matches!(
            h.manager.refresh(&stale.token).await,
            Err(PassportError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn test_cache_timeout_is_never_treated_as_not_revoked() {
        let healthy = harness();
        let pair = healthy.login_as("admin").await.unwrap();

        let (manager, _) = build(config(), Arc::new(UnreachableCache), EventDispatcher::new());
        let err = manager.refresh(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, PassportError::Backend(_)));
        assert!(err.is_retryable());

        let err = manager.authenticate(&pair.access_token).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
