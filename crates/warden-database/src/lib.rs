//! # warden-database
//!
//! PostgreSQL connection management and the admin directory
//! implementations (PostgreSQL and in-memory) used by the login flow.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{AdminRepository, MemoryAdminDirectory};
