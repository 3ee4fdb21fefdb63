//! The credential check pipeline run by login.

use std::sync::Arc;

use tracing::debug;

use warden_core::traits::AdminDirectory;
use warden_core::types::AdminCredential;

use super::rules::{LoginInput, LoginRules};
use crate::captcha::CaptchaService;
use crate::error::{CredentialMismatch, PassportError};
use crate::password::PasswordHasher;

/// Validates login input against the captcha service and the admin
/// directory.
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. input shape
/// 2. captcha answer (the directory is not consulted on a bad captcha)
/// 3. account lookup
/// 4. password digest
/// 5. account status
#[derive(Debug, Clone)]
pub struct CredentialValidator {
    rules: LoginRules,
    captcha: Arc<dyn CaptchaService>,
    directory: Arc<dyn AdminDirectory>,
    hasher: PasswordHasher,
}

impl CredentialValidator {
    /// Creates a validator.
    pub fn new(
        rules: LoginRules,
        captcha: Arc<dyn CaptchaService>,
        directory: Arc<dyn AdminDirectory>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            rules,
            captcha,
            directory,
            hasher,
        }
    }

    /// Runs every check and returns the matching account.
    pub async fn validate(&self, input: &LoginInput) -> Result<AdminCredential, PassportError> {
        if let Some(violation) = self.rules.check(input).into_iter().next() {
            debug!(field = violation.field, "Login input rejected");
            return Err(PassportError::Validation(violation.message));
        }

        if !self.captcha.verify(&input.captcha_id, &input.captcha).await? {
            return Err(PassportError::CaptchaMismatch);
        }

        let admin = self
            .directory
            .find_by_name(&input.name)
            .await?
            .ok_or(PassportError::CredentialMismatch(
                CredentialMismatch::UnknownAccount,
            ))?;

        if !self
            .hasher
            .verify_password(&input.password, &admin.password_salt, &admin.password_hash)
        {
            return Err(PassportError::CredentialMismatch(
                CredentialMismatch::WrongPassword,
            ));
        }

        if admin.is_disabled() {
            return Err(PassportError::AccountDisabled);
        }

        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use warden_core::result::AppResult;
    use warden_core::types::AdminStatus;
    use warden_database::MemoryAdminDirectory;

    use super::*;
    use crate::captcha::CaptchaChallenge;
    use crate::password::DigestAlgorithm;

    const DIGEST: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

    #[derive(Debug)]
    struct FixedCaptcha;

    #[async_trait]
    impl CaptchaService for FixedCaptcha {
        async fn generate(&self) -> AppResult<CaptchaChallenge> {
            Ok(CaptchaChallenge {
                correlation_id: "c1".into(),
                image: String::new(),
            })
        }

        async fn verify(&self, correlation_id: &str, code: &str) -> AppResult<bool> {
            Ok(correlation_id == "c1" && code.eq_ignore_ascii_case("AB12"))
        }
    }

    #[derive(Debug)]
    struct CountingDirectory {
        inner: MemoryAdminDirectory,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl AdminDirectory for CountingDirectory {
        async fn find_by_name(&self, name: &str) -> AppResult<Option<AdminCredential>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_name(name).await
        }
    }

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(DigestAlgorithm::Sha256, "global")
    }

    fn fixture() -> (CredentialValidator, Arc<CountingDirectory>) {
        let inner = MemoryAdminDirectory::new();
        for (id, name, status) in [
            ("1", "admin", AdminStatus::Enabled),
            ("2", "retired", AdminStatus::Disabled),
        ] {
            inner.insert(AdminCredential {
                id: id.into(),
                name: name.into(),
                password_hash: hasher().hash_password(DIGEST, "salt"),
                password_salt: "salt".into(),
                status,
            });
        }
        let directory = Arc::new(CountingDirectory {
            inner,
            lookups: AtomicUsize::new(0),
        });
        let validator = CredentialValidator::new(
            LoginRules::new(4),
            Arc::new(FixedCaptcha),
            directory.clone(),
            hasher(),
        );
        (validator, directory)
    }

    fn input(name: &str, password: &str, captcha: &str) -> LoginInput {
        LoginInput {
            name: name.into(),
            password: password.into(),
            captcha: captcha.into(),
            captcha_id: "c1".into(),
        }
    }

    #[tokio::test]
    async fn test_valid_credentials_return_account() {
        let (validator, _) = fixture();
        let admin = validator.validate(&input("admin", DIGEST, "ab12")).await.unwrap();
        assert_eq!(admin.id, "1");
    }

    #[tokio::test]
    async fn test_bad_shape_skips_captcha_and_directory() {
        let (validator, directory) = fixture();
        let err = validator.validate(&input("", DIGEST, "AB12")).await.unwrap_err();
        assert!(matches!(err, PassportError::Validation(_)));
        assert_eq!(directory.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wrong_captcha_never_consults_directory() {
        let (validator, directory) = fixture();
        let err = validator.validate(&input("admin", DIGEST, "ZZ99")).await.unwrap_err();
        assert!(matches!(err, PassportError::CaptchaMismatch));
        assert_eq!(directory.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let (validator, _) = fixture();
        let err = validator.validate(&input("ghost", DIGEST, "AB12")).await.unwrap_err();
        assert!(matches!(
            err,
            PassportError::CredentialMismatch(CredentialMismatch::UnknownAccount)
        ));
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let (validator, _) = fixture();
        let err = validator
            .validate(&input("admin", "00000000000000000000000000000000", "AB12"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PassportError::CredentialMismatch(CredentialMismatch::WrongPassword)
        ));
    }

    #[tokio::test]
    async fn test_disabled_account_checked_after_password() {
        let (validator, _) = fixture();
        let err = validator
            .validate(&input("retired", DIGEST, "AB12"))
            .await
            .unwrap_err();
        assert!(matches!(err, PassportError::AccountDisabled));

        let err = validator
            .validate(&input("retired", "00000000000000000000000000000000", "AB12"))
            .await
            .unwrap_err();
        assert!(matches!(err, PassportError::CredentialMismatch(_)));
    }
}
