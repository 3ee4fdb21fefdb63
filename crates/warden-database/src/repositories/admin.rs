//! PostgreSQL-backed admin directory.

use async_trait::async_trait;
use sqlx::PgPool;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_core::traits::AdminDirectory;
use warden_core::types::{AdminCredential, AdminStatus};

/// Raw admin row as stored in the `admins` table.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: String,
    name: String,
    password: String,
    password_salt: String,
    status: i32,
}

impl From<AdminRow> for AdminCredential {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            password_hash: row.password,
            password_salt: row.password_salt,
            status: AdminStatus::from_flag(row.status),
        }
    }
}

/// Repository reading admin credentials from PostgreSQL.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminDirectory for AdminRepository {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<AdminCredential>> {
        sqlx::query_as::<_, AdminRow>(
            "SELECT CAST(id AS TEXT) AS id, name, password, password_salt, \
             CAST(status AS INTEGER) AS status \
             FROM admins WHERE name = $1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(AdminCredential::from))
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find admin by name", e))
    }
}
