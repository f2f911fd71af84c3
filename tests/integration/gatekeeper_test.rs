//! Integration tests for the edge gate on protected prefixes.

mod helpers;

use http::StatusCode;
use storefront_entity::user::Role;

#[tokio::test]
async fn test_protected_page_without_cookie_redirects_to_sign_in() {
    let app = helpers::TestApp::new();

    let response = app.get("/admin/products", None).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/auth?redirect=/admin/products"));
}

#[tokio::test]
async fn test_user_role_on_admin_page_redirects_home() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::User);

    let response = app.get("/admin/products", Some(&token)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_admin_role_is_forwarded() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::Admin);

    let response = app.get("/admin/products", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.location().is_none());
    assert_eq!(response.body["data"]["page"], "products");
    assert_eq!(response.body["data"]["session"]["role"], "admin");
}

#[tokio::test]
async fn test_admin_dashboard_root() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::Admin);

    let response = app.get("/admin", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["page"], "dashboard");
}

#[tokio::test]
async fn test_public_page_without_cookie_is_forwarded() {
    let app = helpers::TestApp::new();

    let response = app.get("/api/settings", None).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_redirects_to_sign_in() {
    let app = helpers::TestApp::new();
    let token = app.expired_token(Role::Admin);

    let response = app.get("/admin/orders", Some(&token)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/auth?redirect=/admin/orders"));
}

#[tokio::test]
async fn test_forged_token_redirects_to_sign_in() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::Admin);
    let (payload, signature) = token.rsplit_once('.').unwrap();
    let forged = format!("{payload}.{}", signature.chars().rev().collect::<String>());

    let response = app.get("/admin/customers", Some(&forged)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/auth?redirect=/admin/customers"));
}

#[tokio::test]
async fn test_garbage_cookie_redirects_to_sign_in() {
    let app = helpers::TestApp::new();

    let response = app.get("/admin", Some("not-a-token")).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/auth?redirect=/admin"));
}

#[tokio::test]
async fn test_admin_api_is_gated() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "PUT",
            "/api/admin/settings",
            Some(serde_json::json!({ "brand_name": "Hijack" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/auth?redirect=/api/admin/settings"));
}

#[tokio::test]
async fn test_lookalike_prefix_is_not_gated() {
    let app = helpers::TestApp::new();

    let response = app.get("/administrator", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.location().is_none());
}

#[tokio::test]
async fn test_parent_segment_out_of_admin_is_gated() {
    let app = helpers::TestApp::new();

    let response = app.get("/admin/../cart", None).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/auth?redirect=/admin/../cart"));

    let token = app.token(Role::User);
    let response = app.get("/admin/../cart", Some(&token)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_current_segment_under_admin_is_gated() {
    let app = helpers::TestApp::new();

    let response = app.get("/admin/./x", None).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/auth?redirect=/admin/./x"));
}

#[tokio::test]
async fn test_encoded_dot_segments_are_gated() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::User);

    let response = app.get("/admin/%2e%2e/cart", Some(&token)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));
}
