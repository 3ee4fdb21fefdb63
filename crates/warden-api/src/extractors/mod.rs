//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::CurrentAdmin;
pub use json::JsonBody;
