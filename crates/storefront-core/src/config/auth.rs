//! Session credential configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped in the defaults. Refused outside development.
pub const PLACEHOLDER_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_TTL_MINUTES: u64 = 60 * 24 * 365;

/// Session credential signing and cookie configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_session_secret")]
    pub session_secret: String,
    /// Lifetime of an issued session token in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// Name of the HTTP-only cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl AuthConfig {
    /// Whether the configured secret is still the shipped placeholder.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.session_secret == PLACEHOLDER_SECRET
    }
}

// The secret never reaches logs through `{:?}`.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_secret", &"<redacted>")
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: default_session_secret(),
            session_ttl_minutes: default_session_ttl(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_session_secret() -> String {
    PLACEHOLDER_SECRET.to_string()
}

fn default_session_ttl() -> u64 {
    60 * 24
}

fn default_cookie_name() -> String {
    "session".to_string()
}
