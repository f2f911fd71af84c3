//! Integration tests for session introspection, navigation and logout.

mod helpers;

use http::StatusCode;
use serde_json::Value;
use storefront_entity::user::Role;

#[tokio::test]
async fn test_session_without_cookie_is_null() {
    let app = helpers::TestApp::new();

    let response = app.get("/api/auth/session", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "user": null }));
}

#[tokio::test]
async fn test_session_with_invalid_cookie_is_null() {
    let app = helpers::TestApp::new();
    let expired = app.expired_token(Role::Admin);

    for token in ["garbage", expired.as_str()] {
        let response = app.get("/api/auth/session", Some(token)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["user"], Value::Null);
    }
}

#[tokio::test]
async fn test_session_returns_user() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::User);

    let response = app.get("/api/auth/session", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["id"], "user-1");
    assert_eq!(response.body["user"]["email"], "user@example.com");
    assert_eq!(response.body["user"]["name"], "Test User");
    assert_eq!(response.body["user"]["role"], "user");
}

fn hrefs(body: &Value) -> Vec<String> {
    body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["href"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_guest_navigation_has_no_admin_links() {
    let app = helpers::TestApp::new();

    let response = app.get("/api/navigation", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let hrefs = hrefs(&response.body);
    assert!(!hrefs.is_empty());
    assert!(hrefs.iter().all(|h| !h.starts_with("/admin")));
    assert_eq!(response.body["data"]["landing"], "/auth");
}

#[tokio::test]
async fn test_admin_navigation() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::Admin);

    let response = app.get("/api/navigation", Some(&token)).await;

    let hrefs = hrefs(&response.body);
    assert!(hrefs.contains(&"/admin/products".to_string()));
    assert_eq!(response.body["data"]["landing"], "/");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = helpers::TestApp::new();
    let token = app.token(Role::User);

    let response = app.request("POST", "/api/auth/logout", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.set_cookie().expect("logout should set a cookie");
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("Max-Age=0"));
}
