//! Edge gate: runs before routing for every request.
//!
//! Paths under a protected prefix never reach a handler without a valid
//! credential of sufficient role. Everything else passes untouched.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use storefront_auth::GateOutcome;

use crate::state::AppState;

/// Applies the [`storefront_auth::Gatekeeper`] to the request path and session cookie.
pub async fn edge_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let credential = jar.get(state.cookie_name()).map(|c| c.value());
    let outcome = state.gatekeeper.evaluate(request.uri().path(), credential);

    match outcome {
        GateOutcome::Forwarded => next.run(request).await,
        GateOutcome::RedirectToAuth { location, .. }
        | GateOutcome::RedirectToHome { location, .. } => {
            Redirect::temporary(&location).into_response()
        }
    }
}
