//! End-to-end tests: the access hook against a live server.

mod helpers;

use std::sync::{Arc, Mutex};

use storefront_client::{AccessHook, HookConfig, HookState, HttpIntrospector, Navigator};
use storefront_entity::user::Role;

#[derive(Default)]
struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}

/// Serves the test app on an ephemeral port and returns its base URL.
async fn serve(app: &helpers::TestApp) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn hook(
    app: &helpers::TestApp,
    introspector: HttpIntrospector,
) -> (AccessHook, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let hook = AccessHook::new(
        Arc::clone(&app.state.route_policy),
        Arc::new(introspector),
        navigator.clone(),
        HookConfig::from_access(&app.state.config.access),
    );
    (hook, navigator)
}

#[tokio::test]
async fn test_hook_denies_user_on_admin_page() {
    let app = helpers::TestApp::new();
    let base = serve(&app).await;
    let token = app.token(Role::User);
    let introspector = HttpIntrospector::new(&base, &app.state.config.access)
        .unwrap()
        .with_session(app.state.cookie_name(), &token);

    let (mut hook, navigator) = hook(&app, introspector);
    hook.mount("/admin/customers").await.unwrap();

    assert!(matches!(hook.state(), HookState::Denied { .. }));
    assert!(!hook.should_render());
    assert_eq!(*navigator.visits.lock().unwrap(), vec!["/".to_string()]);
}

#[tokio::test]
async fn test_hook_allows_admin() {
    let app = helpers::TestApp::new();
    let base = serve(&app).await;
    let token = app.token(Role::Admin);
    let introspector = HttpIntrospector::new(&base, &app.state.config.access)
        .unwrap()
        .with_session(app.state.cookie_name(), &token);

    let (mut hook, navigator) = hook(&app, introspector);
    hook.mount("/admin/customers").await.unwrap();

    let snapshot = hook.snapshot();
    assert!(snapshot.allowed);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.user.unwrap().role, Role::Admin);
    assert!(navigator.visits.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_hook_anonymous_on_cart() {
    let app = helpers::TestApp::new();
    let base = serve(&app).await;
    let introspector = HttpIntrospector::new(&base, &app.state.config.access).unwrap();

    let (mut hook, _) = hook(&app, introspector);
    hook.mount("/cart").await.unwrap();

    assert_eq!(hook.state(), HookState::Allowed { user: None });
}
