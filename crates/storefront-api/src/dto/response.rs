//! Response DTOs.

use serde::{Deserialize, Serialize};

use storefront_auth::{AuthorizedSession, NavItem};
use storefront_entity::user::ResolvedSession;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of the session-introspection endpoint: `{"user": {...} | null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The signed-in user, or `null`.
    pub user: Option<ResolvedSession>,
}

/// Navigation menu for the current visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResponse {
    /// Links the visitor may open.
    pub items: Vec<NavItem>,
    /// Default destination for the visitor: sign-in when nobody is signed
    /// in, home otherwise.
    pub landing: String,
}

/// An admin console page, as seen by an authorized session.
#[derive(Debug, Clone, Serialize)]
pub struct AdminPageResponse {
    /// Page slug, e.g. `products`; `dashboard` for the console root.
    pub page: String,
    /// The session that opened it.
    pub session: AuthorizedSession,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}
