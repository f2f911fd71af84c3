//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use storefront_auth::{Gatekeeper, Navigation, RoutePolicy, SessionResolver, TokenCodec};
use storefront_core::config::AppConfig;

use crate::services::settings::SettingsService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Everything here is
/// immutable after startup apart from the settings cache.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Access control ───────────────────────────────────────
    /// Session token codec
    pub token_codec: Arc<TokenCodec>,
    /// Route → role policy shared by every enforcement point
    pub route_policy: Arc<RoutePolicy>,
    /// Edge gate for protected prefixes
    pub gatekeeper: Arc<Gatekeeper>,
    /// Server-side session resolver
    pub session_resolver: Arc<SessionResolver>,
    /// Per-role navigation menus
    pub navigation: Arc<Navigation>,

    // ── Services ─────────────────────────────────────────────
    /// Site settings with TTL cache
    pub settings_service: Arc<SettingsService>,
}

impl AppState {
    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.config.auth.cookie_name
    }
}
