//! # warden-auth
//!
//! Admin login and token lifecycle for Warden.
//!
//! ## Modules
//!
//! - `credential`: login input rules and the credential check pipeline
//! - `password`: server-side salted password digests
//! - `captcha`: captcha issuance and single-use verification
//! - `jwt`: signed claim sets tagged as access or refresh tokens
//! - `revocation`: fingerprint blacklist for still-valid tokens
//! - `events`: lifecycle listeners (audit log, subscribers)
//! - `session`: login, refresh, logout and bearer authentication flows

pub mod captcha;
pub mod credential;
pub mod error;
pub mod events;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod session;

pub use captcha::{CacheCaptchaService, CaptchaChallenge, CaptchaService};
pub use credential::{CredentialValidator, LoginInput};
pub use error::PassportError;
pub use events::{ChannelListener, EventDispatcher, PassportListener, TracingListener};
pub use jwt::{ClaimSet, IssuedToken, TokenCodec};
pub use password::PasswordHasher;
pub use revocation::RevocationStore;
pub use session::{CurrentIdentity, RefreshedToken, SessionManager, TokenPair};
