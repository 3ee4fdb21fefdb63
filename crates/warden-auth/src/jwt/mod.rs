//! Signed token issuance and verification.

pub mod claims;
pub mod codec;

pub use claims::ClaimSet;
pub use codec::{IssuedToken, TokenCodec};
