//! Session introspection: asks the server who is signed in.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::COOKIE;
use serde::Deserialize;
use tracing::debug;

use storefront_auth::AccessError;
use storefront_core::config::AccessConfig;
use storefront_core::error::{AppError, ErrorKind};
use storefront_entity::user::ResolvedSession;

/// Source of the current session for the access hook.
#[async_trait]
pub trait SessionIntrospector: Send + Sync + 'static {
    /// Returns the signed-in user, `None` when nobody is signed in.
    ///
    /// Transport failures are reported as [`AccessError::NetworkFailure`].
    async fn introspect(&self) -> Result<Option<ResolvedSession>, AccessError>;
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    user: Option<ResolvedSession>,
}

/// Calls the server's session-introspection endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpIntrospector {
    client: Client,
    url: String,
    cookie: Option<String>,
}

impl HttpIntrospector {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates an introspector for the server at `base_url`.
    pub fn new(base_url: &str, access: &AccessConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Self::DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            url: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                access.introspection_path
            ),
            cookie: None,
        })
    }

    /// Sends `token` as the `cookie_name` cookie on every call.
    ///
    /// Browsers attach the cookie themselves; other clients set it here.
    pub fn with_session(mut self, cookie_name: &str, token: &str) -> Self {
        self.cookie = Some(format!("{cookie_name}={token}"));
        self
    }

    /// Full URL of the introspection endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SessionIntrospector for HttpIntrospector {
    async fn introspect(&self) -> Result<Option<ResolvedSession>, AccessError> {
        let mut request = self.client.get(&self.url);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AccessError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), url = %self.url, "Session introspection rejected");
            return Err(AccessError::NetworkFailure(format!(
                "introspection returned {status}"
            )));
        }

        let body: SessionBody = response
            .json()
            .await
            .map_err(|e| AccessError::NetworkFailure(e.to_string()))?;
        Ok(body.user)
    }
}
