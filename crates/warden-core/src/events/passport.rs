//! Login, refresh and logout lifecycle events.

use serde::{Deserialize, Serialize};

/// Events related to admin authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PassportEvent {
    /// A login attempt was received, before any validation ran.
    LoginAttempted {
        /// The login name as submitted (may be empty).
        name: String,
    },
    /// Credentials were accepted and a token pair was issued.
    LoggedIn {
        /// The admin ID.
        admin_id: String,
        /// The login name.
        name: String,
    },
    /// A refresh token minted a new access token.
    TokenRefreshed {
        /// The admin ID.
        admin_id: String,
    },
    /// An admin logged out and both tokens were blacklisted.
    LoggedOut {
        /// The admin ID.
        admin_id: String,
    },
}

impl PassportEvent {
    /// Short, stable name for log lines and metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginAttempted { .. } => "login_attempted",
            Self::LoggedIn { .. } => "logged_in",
            Self::TokenRefreshed { .. } => "token_refreshed",
            Self::LoggedOut { .. } => "logged_out",
        }
    }
}
