//! Core traits defined in `warden-core` and implemented by other crates.

pub mod cache;
pub mod directory;

pub use cache::CacheProvider;
pub use directory::AdminDirectory;
