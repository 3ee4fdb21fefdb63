//! Token revocation by fingerprint.

pub mod store;

pub use store::{RevocationStore, fingerprint};
