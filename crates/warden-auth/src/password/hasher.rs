//! Server-side salted password digests.
//!
//! Clients never send the plaintext password. They submit a 32-character
//! hex digest, which the server salts twice (per-account, then global)
//! before comparing against the stored hash:
//!
//! ```text
//! stored = H( H(client_digest + account_salt) + global_salt )
//! ```

use sha2::{Digest, Sha256, Sha512};

use warden_core::config::PassportConfig;
use warden_core::error::AppError;

/// Digest function used for the server-side hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256, 64 hex characters.
    Sha256,
    /// SHA-512, 128 hex characters.
    Sha512,
}

impl DigestAlgorithm {
    fn hex_digest(self, input: &str) -> String {
        match self {
            Self::Sha256 => format!("{:x}", Sha256::digest(input.as_bytes())),
            Self::Sha512 => format!("{:x}", Sha512::digest(input.as_bytes())),
        }
    }
}

impl std::str::FromStr for DigestAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(AppError::configuration(format!(
                "Unsupported password algorithm '{other}'"
            ))),
        }
    }
}

/// Computes and verifies the salted server-side password hash.
#[derive(Clone)]
pub struct PasswordHasher {
    algorithm: DigestAlgorithm,
    global_salt: String,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Creates a hasher with an explicit algorithm and global salt.
    pub fn new(algorithm: DigestAlgorithm, global_salt: impl Into<String>) -> Self {
        Self {
            algorithm,
            global_salt: global_salt.into(),
        }
    }

    /// Creates a hasher from passport configuration.
    pub fn from_config(config: &PassportConfig) -> Result<Self, AppError> {
        Ok(Self::new(
            config.password_algorithm.parse()?,
            config.password_salt.clone(),
        ))
    }

    /// Hashes a client digest with the account salt and the global salt.
    pub fn hash_password(&self, client_digest: &str, account_salt: &str) -> String {
        let inner = self
            .algorithm
            .hex_digest(&format!("{client_digest}{account_salt}"));
        self.algorithm
            .hex_digest(&format!("{inner}{}", self.global_salt))
    }

    /// Whether `client_digest` hashes to `stored_hash`.
    pub fn verify_password(&self, client_digest: &str, account_salt: &str, stored_hash: &str) -> bool {
        let computed = self.hash_password(client_digest, account_salt);
        constant_time_eq(computed.as_bytes(), stored_hash.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT_DIGEST: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new(DigestAlgorithm::Sha256, "global");
        let stored = hasher.hash_password(CLIENT_DIGEST, "acct-salt");
        assert_eq!(stored.len(), 64);
        assert!(hasher.verify_password(CLIENT_DIGEST, "acct-salt", &stored));
        assert!(!hasher.verify_password(CLIENT_DIGEST, "other-salt", &stored));
        assert!(!hasher.verify_password("00000000000000000000000000000000", "acct-salt", &stored));
    }

    #[test]
    fn test_global_salt_changes_hash() {
        let a = PasswordHasher::new(DigestAlgorithm::Sha256, "one");
        let b = PasswordHasher::new(DigestAlgorithm::Sha256, "two");
        assert_ne!(
            a.hash_password(CLIENT_DIGEST, "s"),
            b.hash_password(CLIENT_DIGEST, "s")
        );
    }

    #[test]
    fn test_double_salted_composition() {
        let hasher = PasswordHasher::new(DigestAlgorithm::Sha256, "g");
        let inner = format!("{:x}", Sha256::digest(format!("{CLIENT_DIGEST}s").as_bytes()));
        let expected = format!("{:x}", Sha256::digest(format!("{inner}g").as_bytes()));
        assert_eq!(hasher.hash_password(CLIENT_DIGEST, "s"), expected);
    }

    #[test]
    fn test_sha512_from_config() {
        let config = PassportConfig {
            password_algorithm: "sha512".into(),
            ..PassportConfig::default()
        };
        let hasher = PasswordHasher::from_config(&config).unwrap();
        assert_eq!(hasher.hash_password(CLIENT_DIGEST, "s").len(), 128);
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        assert!("md5".parse::<DigestAlgorithm>().is_err());
    }
}
