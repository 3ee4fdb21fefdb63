//! Shared domain types.

pub mod admin;

pub use admin::{AdminCredential, AdminStatus};
