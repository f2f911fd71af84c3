//! Application builder: wires configuration, access control and services
//! into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tracing::info;

use storefront_auth::{Gatekeeper, Navigation, RoutePolicy, SessionResolver, TokenCodec};
use storefront_core::config::AppConfig;
use storefront_core::result::AppResult;

use crate::router::build_router;
use crate::services::settings::{MemorySettingsStore, SettingsService, SettingsStore};
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Builds application state backed by an in-memory settings store.
pub fn build_state(config: AppConfig) -> AppResult<AppState> {
    build_state_with_store(config, Arc::new(MemorySettingsStore::default()))
}

/// Builds application state around the given settings store.
///
/// Fails when the route policy in `config` is invalid.
pub fn build_state_with_store(
    config: AppConfig,
    store: Arc<dyn SettingsStore>,
) -> AppResult<AppState> {
    let route_policy = Arc::new(RoutePolicy::from_config(&config.access)?);
    info!(
        entries = route_policy.entries().count(),
        protected = ?config.access.protected_prefixes,
        "Route policy loaded"
    );

    let token_codec = Arc::new(TokenCodec::new(&config.auth));
    let gatekeeper = Arc::new(Gatekeeper::new(
        Arc::clone(&token_codec),
        Arc::clone(&route_policy),
        &config.access,
    ));
    let session_resolver = Arc::new(SessionResolver::new(
        Arc::clone(&token_codec),
        Arc::clone(&route_policy),
        &config.access,
    ));

    let settings_service = Arc::new(SettingsService::new(
        store,
        Duration::from_secs(config.settings.cache_ttl_seconds),
    ));

    Ok(AppState {
        config: Arc::new(config),
        token_codec,
        route_policy,
        gatekeeper,
        session_resolver,
        navigation: Arc::new(Navigation::default()),
        settings_service,
    })
}
