//! # storefront-api
//!
//! HTTP layer for the storefront built on Axum.
//!
//! Provides the edge gatekeeper middleware, the session extractors used by
//! handlers, the session-introspection endpoint, admin page and settings
//! endpoints, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

pub use app::{build_app, build_state, build_state_with_store};
pub use state::AppState;
