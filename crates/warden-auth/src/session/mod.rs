//! Session lifecycle: login, refresh, logout and bearer authentication.

pub mod identity;
pub mod manager;

pub use identity::{CurrentIdentity, RefreshedToken, TokenPair};
pub use manager::SessionManager;
