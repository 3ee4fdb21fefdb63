//! Password hashing.

pub mod hasher;

pub use hasher::{DigestAlgorithm, PasswordHasher};
