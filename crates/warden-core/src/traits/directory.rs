//! Admin directory lookup.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::admin::AdminCredential;

/// Read-only source of admin credentials.
///
/// Implemented by the database crate (PostgreSQL and in-memory). The
/// passport flows never write through this trait.
#[async_trait]
pub trait AdminDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Find an admin by exact login name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<AdminCredential>>;
}
