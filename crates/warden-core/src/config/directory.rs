//! Admin directory configuration.

use serde::{Deserialize, Serialize};

/// Where admin credentials are looked up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory provider: `"memory"` or `"postgres"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Accounts loaded into the in-memory provider at startup.
    #[serde(default)]
    pub admins: Vec<SeedAdmin>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            admins: Vec::new(),
        }
    }
}

/// A pre-hashed admin account for the in-memory directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAdmin {
    /// Stable admin identifier (becomes the token subject).
    pub id: String,
    /// Login name.
    pub name: String,
    /// Server-side password digest.
    pub password_hash: String,
    /// Per-account salt.
    pub password_salt: String,
    /// Whether the account may log in.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_true() -> bool {
    true
}
