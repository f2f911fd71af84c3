//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{Duration, Utc};
use http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use storefront_api::services::settings::{MemorySettingsStore, SettingsStore};
use storefront_api::{AppState, build_app, build_state_with_store};
use storefront_core::config::AppConfig;
use storefront_entity::user::Role;

/// Secret shared by every test server.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application state, for minting credentials
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with an empty settings store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemorySettingsStore::default()))
    }

    /// Create a test application around `store`
    pub fn with_store(store: Arc<dyn SettingsStore>) -> Self {
        let state = build_state_with_store(test_config(), store).expect("Failed to build state");
        let router = build_app(state.clone());
        Self { router, state }
    }

    /// A valid session token for `role`
    pub fn token(&self, role: Role) -> String {
        let claims = self.state.token_codec.issue(
            "user-1",
            &format!("{role}@example.com"),
            Some("Test User"),
            role,
        );
        self.state.token_codec.sign(&claims).expect("Failed to sign token")
    }

    /// A token for `role` that expired a day ago
    pub fn expired_token(&self, role: Role) -> String {
        let issued = Utc::now() - Duration::days(2);
        let claims = self.state.token_codec.issue_at(
            "user-1",
            "stale@example.com",
            None,
            role,
            issued,
        );
        self.state.token_codec.sign(&claims).expect("Failed to sign token")
    }

    /// Send a request, optionally carrying a session cookie
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(token) = session {
            req = req.header(COOKIE, format!("{}={}", self.state.cookie_name(), token));
        }

        let body = match body {
            Some(json) => {
                req = req.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).expect("Failed to serialize body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(req.body(body).expect("Failed to build request"))
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// GET `path`
    pub async fn get(&self, path: &str, session: Option<&str>) -> TestResponse {
        self.request("GET", path, None, session).await
    }
}

/// Configuration used by every test server
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.session_secret = TEST_SECRET.to_string();
    config
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` when empty or not JSON
    pub body: Value,
}

impl TestResponse {
    /// The `Location` header, if any
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// The first `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get(SET_COOKIE).and_then(|v| v.to_str().ok())
    }
}
