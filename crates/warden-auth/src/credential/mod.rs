//! Login credential checks.

pub mod rules;
pub mod validator;

pub use rules::{LoginInput, LoginRules, Violation};
pub use validator::CredentialValidator;
