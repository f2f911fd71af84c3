//! Role-dependent navigation menu.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, NavigationResponse};
use crate::extractors::CurrentSession;
use crate::state::AppState;

/// GET /api/navigation
pub async fn navigation(
    State(state): State<AppState>,
    CurrentSession(user): CurrentSession,
) -> Json<ApiResponse<NavigationResponse>> {
    let role = user.map(|u| u.role);
    let items = state.navigation.for_role(&state.route_policy, role);
    let landing = state.session_resolver.landing_path(role).to_string();
    Json(ApiResponse::ok(NavigationResponse { items, landing }))
}
