//! In-memory admin directory for tests and single-node deployments.

use async_trait::async_trait;
use dashmap::DashMap;

use warden_core::config::directory::SeedAdmin;
use warden_core::result::AppResult;
use warden_core::traits::AdminDirectory;
use warden_core::types::{AdminCredential, AdminStatus};

/// Admin directory held in a concurrent map keyed by login name.
#[derive(Debug, Default)]
pub struct MemoryAdminDirectory {
    admins: DashMap<String, AdminCredential>,
}

impl MemoryAdminDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from configured seed accounts.
    pub fn from_seeds(seeds: &[SeedAdmin]) -> Self {
        let directory = Self::new();
        for seed in seeds {
            directory.insert(AdminCredential {
                id: seed.id.clone(),
                name: seed.name.clone(),
                password_hash: seed.password_hash.clone(),
                password_salt: seed.password_salt.clone(),
                status: if seed.enabled {
                    AdminStatus::Enabled
                } else {
                    AdminStatus::Disabled
                },
            });
        }
        directory
    }

    /// Adds or replaces an account.
    pub fn insert(&self, admin: AdminCredential) {
        self.admins.insert(admin.name.clone(), admin);
    }

    /// Number of accounts held.
    pub fn len(&self) -> usize {
        self.admins.len()
    }

    /// Whether the directory holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

#[async_trait]
impl AdminDirectory for MemoryAdminDirectory {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<AdminCredential>> {
        Ok(self.admins.get(name).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(name: &str, enabled: bool) -> SeedAdmin {
        SeedAdmin {
            id: format!("id-{name}"),
            name: name.to_string(),
            password_hash: "hash".to_string(),
            password_salt: "salt".to_string(),
            enabled,
        }
    }

    #[tokio::test]
    async fn test_lookup_by_exact_name() {
        let directory = MemoryAdminDirectory::from_seeds(&[seed("admin", true)]);
        let found = directory.find_by_name("admin").await.unwrap().unwrap();
        assert_eq!(found.id, "id-admin");
        assert_eq!(found.status, AdminStatus::Enabled);

        assert!(directory.find_by_name("Admin").await.unwrap().is_none());
        assert!(directory.find_by_name("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_disabled_seed() {
        let directory = MemoryAdminDirectory::from_seeds(&[seed("ops", false)]);
        let found = directory.find_by_name("ops").await.unwrap().unwrap();
        assert!(found.is_disabled());
        assert_eq!(directory.len(), 1);
    }
}
