//! Integration tests for the site settings endpoints.

mod helpers;

use std::sync::Arc;

use http::StatusCode;
use storefront_api::services::settings::MemorySettingsStore;
use storefront_entity::settings::SiteSettings;
use storefront_entity::user::Role;

#[tokio::test]
async fn test_public_settings() {
    let store = MemorySettingsStore::new(SiteSettings {
        brand_name: "Lumen".to_string(),
        email_address: "hello@lumen.shop".to_string(),
        ..SiteSettings::default()
    });
    let app = helpers::TestApp::with_store(Arc::new(store));

    let response = app.get("/api/settings", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["brand_name"], "Lumen");
    assert_eq!(response.body["data"]["email_address"], "hello@lumen.shop");
    assert_eq!(response.body["data"]["logo_url"], "");
}

#[tokio::test]
async fn test_admin_update_is_visible_immediately() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::Admin);

    // Prime the cache.
    let before = app.get("/api/settings", None).await;
    assert_eq!(before.body["data"]["brand_name"], "");

    let response = app
        .request(
            "PUT",
            "/api/admin/settings",
            Some(serde_json::json!({
                "brand_name": "Lumen",
                "instagram_url": "https://instagram.com/lumen",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app.get("/api/settings", None).await;
    assert_eq!(after.body["data"]["brand_name"], "Lumen");
    assert_eq!(after.body["data"]["instagram_url"], "https://instagram.com/lumen");
}

#[tokio::test]
async fn test_user_cannot_update_settings() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::User);

    let response = app
        .request(
            "PUT",
            "/api/admin/settings",
            Some(serde_json::json!({ "brand_name": "Nope" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_invalid_settings_are_rejected() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::Admin);

    let response = app
        .request(
            "PUT",
            "/api/admin/settings",
            Some(serde_json::json!({ "facebook_url": "facebook.com/lumen" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
