//! Route definitions for the storefront HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor. The edge gate wraps every route, the fallback
//! included.

use axum::{
    Router,
    http::Uri,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use storefront_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(auth_routes(&state.config.access.introspection_path))
        .merge(public_routes())
        .merge(admin_routes())
        .fallback(not_found)
        // Innermost first: the gate sees every request after logging starts.
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::gatekeeper::edge_gate,
        ))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Session introspection and logout
fn auth_routes(introspection_path: &str) -> Router<AppState> {
    Router::new()
        .route(introspection_path, get(handlers::session::session))
        .route("/api/auth/logout", post(handlers::session::logout))
}

/// Endpoints open to every visitor
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/navigation", get(handlers::navigation::navigation))
        .route("/api/settings", get(handlers::settings::get_settings))
}

/// Admin console and admin API (edge-gated)
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(handlers::admin::dashboard))
        .route("/admin/{*page}", get(handlers::admin::page))
        .route("/api/admin/settings", put(handlers::settings::update_settings))
}

async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("No route for {}", uri.path())).into()
}
