//! Session extractors: read the session cookie and resolve it server-side.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use storefront_auth::AuthorizedSession;
use storefront_entity::user::ResolvedSession;

use crate::error::AccessRedirect;
use crate::state::AppState;

/// The current session, or `None` when nobody is signed in. Never rejects.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<ResolvedSession>);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = session_cookie(parts, state);
        Ok(Self(
            state.session_resolver.current_session(credential.as_deref()),
        ))
    }
}

/// A session allowed to open the requested path.
///
/// Rejects with a redirect home when the route policy denies the path.
#[derive(Debug, Clone)]
pub struct RequireAccess(pub AuthorizedSession);

impl std::ops::Deref for RequireAccess {
    type Target = AuthorizedSession;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for RequireAccess {
    type Rejection = AccessRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = session_cookie(parts, state);
        let path = original_path(parts);
        state
            .session_resolver
            .require_access(credential.as_deref(), &path)
            .map(Self)
            .map_err(AccessRedirect)
    }
}

fn session_cookie(parts: &Parts, state: &AppState) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(state.cookie_name())
        .map(|c| c.value().to_string())
}

/// Path as the client sent it, before any nesting stripped a prefix.
fn original_path(parts: &Parts) -> String {
    parts
        .extensions
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string())
}
