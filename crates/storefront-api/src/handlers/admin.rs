//! Admin console pages.
//!
//! The edge gate already covers `/admin`; the [`RequireAccess`] extractor
//! re-checks the route policy in case a request arrives some other way.

use axum::Json;
use axum::extract::Path;

use crate::dto::response::{AdminPageResponse, ApiResponse};
use crate::extractors::RequireAccess;

/// GET /admin
pub async fn dashboard(RequireAccess(session): RequireAccess) -> Json<ApiResponse<AdminPageResponse>> {
    Json(ApiResponse::ok(AdminPageResponse {
        page: "dashboard".to_string(),
        session,
    }))
}

/// GET /admin/{*page}
pub async fn page(
    RequireAccess(session): RequireAccess,
    Path(page): Path<String>,
) -> Json<ApiResponse<AdminPageResponse>> {
    Json(ApiResponse::ok(AdminPageResponse {
        page: page.trim_end_matches('/').to_string(),
        session,
    }))
}
