//! Site settings handlers.

use axum::Json;
use axum::extract::State;

use storefront_entity::settings::SiteSettings;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::RequireAccess;
use crate::state::AppState;

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> Json<ApiResponse<SiteSettings>> {
    Json(ApiResponse::ok(state.settings_service.get().await))
}

/// PUT /api/admin/settings
pub async fn update_settings(
    State(state): State<AppState>,
    _admin: RequireAccess,
    Json(settings): Json<SiteSettings>,
) -> Result<Json<ApiResponse<SiteSettings>>, ApiError> {
    settings.validate()?;
    let updated = state.settings_service.update(settings).await?;
    Ok(Json(ApiResponse::ok(updated)))
}
