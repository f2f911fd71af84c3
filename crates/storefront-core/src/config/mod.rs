//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files plus `STOREFRONT__*` environment variables. Each sub-module
//! represents a logical configuration section.

pub mod access;
pub mod app;
pub mod auth;
pub mod logging;
pub mod settings;

use serde::{Deserialize, Serialize};

pub use self::access::{AccessConfig, RouteRule};
pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, MAX_SESSION_TTL_MINUTES};
pub use self::logging::LoggingConfig;
pub use self::settings::SettingsConfig;

use crate::error::AppError;

/// Environment name under which the placeholder secret is tolerated.
pub const DEVELOPMENT_ENV: &str = "development";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Session credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Route access policy.
    #[serde(default)]
    pub access: AccessConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Site settings cache.
    #[serde(default)]
    pub settings: SettingsConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, the `config/{env}.toml` overlay, and
    /// environment variables prefixed with `STOREFRONT__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("STOREFRONT")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("access.protected_prefixes")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Rejects configurations that must never reach a running server.
    pub fn validate(&self, env: &str) -> Result<(), AppError> {
        if self.auth.session_secret.is_empty() {
            return Err(AppError::configuration("auth.session_secret must not be empty"));
        }
        if self.auth.uses_placeholder_secret() && env != DEVELOPMENT_ENV {
            return Err(AppError::configuration(format!(
                "auth.session_secret is still the placeholder value (env: {env})"
            )));
        }
        if self.auth.session_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.session_ttl_minutes must be greater than zero",
            ));
        }
        if self.auth.session_ttl_minutes > MAX_SESSION_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.session_ttl_minutes must be at most {MAX_SESSION_TTL_MINUTES}"
            )));
        }
        if self.auth.cookie_name.is_empty() {
            return Err(AppError::configuration("auth.cookie_name must not be empty"));
        }
        Ok(())
    }
}
