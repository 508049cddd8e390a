//! Access gate: authenticates every request to a protected route.
//!
//! An absent cookie and an invalid (malformed, mis-signed, or expired)
//! token are rejected identically, before any repository access. On
//! success the resolved identity is attached to the request for the
//! handlers' `Identity` extractor.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use cradle_domain::id::UserId;
use cradle_session::cookie::SESSION_COOKIE;
use cradle_session::identity::Identity;
use cradle_session::token::verify_session;

use crate::error::ApiError;
use crate::state::AppState;

/// Middleware for `axum::middleware::from_fn_with_state`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or(ApiError::Unauthenticated)?;

    let identity = verify_session(&token, &state.session_secret)
        .map_err(|_| ApiError::Unauthenticated)?;

    request.extensions_mut().insert(Identity {
        user_id: UserId(identity),
    });
    Ok(next.run(request).await)
}
