//! Admin credential record as read from the directory.

use serde::{Deserialize, Serialize};

/// Account status of an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatus {
    /// The account may log in.
    Enabled,
    /// The account is blocked from logging in.
    Disabled,
}

impl AdminStatus {
    /// Maps the integer status column used by admin tables (0 = disabled).
    pub fn from_flag(flag: i32) -> Self {
        if flag == 0 {
            Self::Disabled
        } else {
            Self::Enabled
        }
    }
}

/// The credential fields the login flow needs.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminCredential {
    /// Stable admin identifier.
    pub id: String,
    /// Login name.
    pub name: String,
    /// Server-side password digest.
    pub password_hash: String,
    /// Per-account salt.
    pub password_salt: String,
    /// Account status.
    pub status: AdminStatus,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("status", &self.status)
            .finish()
    }
}

impl AdminCredential {
    /// Whether the account is disabled.
    pub fn is_disabled(&self) -> bool {
        self.status == AdminStatus::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flag_mapping() {
        assert_eq!(AdminStatus::from_flag(0), AdminStatus::Disabled);
        assert_eq!(AdminStatus::from_flag(1), AdminStatus::Enabled);
    }

    #[test]
    fn test_debug_hides_password_fields() {
        let admin = AdminCredential {
            id: "a1".to_string(),
            name: "admin".to_string(),
            password_hash: "secret-hash".to_string(),
            password_salt: "secret-salt".to_string(),
            status: AdminStatus::Enabled,
        };
        let rendered = format!("{admin:?}");
        assert!(!rendered.contains("secret-hash"));
        assert!(!rendered.contains("secret-salt"));
    }
}
