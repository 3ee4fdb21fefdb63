//! Admin directory implementations.

pub mod admin;
pub mod memory;

pub use admin::AdminRepository;
pub use memory::MemoryAdminDirectory;
