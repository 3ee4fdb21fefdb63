//! # warden-core
//!
//! Core crate for Warden. Contains configuration schemas, collaborator
//! traits, the admin credential type, passport lifecycle events,
//! and the unified infrastructure error.
//!
//! This crate has **no** internal dependencies on other Warden crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
