//! Session introspection and logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use tracing::info;

use crate::dto::response::{ApiResponse, MessageResponse, SessionResponse};
use crate::extractors::CurrentSession;
use crate::state::AppState;

/// GET /api/auth/session
///
/// Always `200`; an absent or unusable credential reads as `{"user": null}`.
pub async fn session(CurrentSession(user): CurrentSession) -> Json<SessionResponse> {
    Json(SessionResponse { user })
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(user): CurrentSession,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    if let Some(user) = &user {
        info!(user_id = %user.id, "User signed out");
    }

    let cookie = Cookie::build((state.cookie_name().to_string(), "")).path("/");
    (
        jar.remove(cookie),
        Json(ApiResponse::ok(MessageResponse {
            message: "Signed out".to_string(),
        })),
    )
}
