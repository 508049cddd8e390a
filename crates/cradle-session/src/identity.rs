//! Identity extractor filled in by the access gate.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use cradle_domain::id::UserId;

/// Resolved identity of the authenticated caller.
///
/// Inserted into request extensions by the access gate after the session
/// token verifies. A handler extracting `Identity` on a route the gate
/// never ran on is a wiring error, not an authentication failure, so the
/// missing-extension path rejects with [`MissingIdentity`] (500), never 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

/// Rejection for a protected handler mounted outside the gate. Rendered
/// in the same `{kind, message}` shape as every other service error.
#[derive(Debug)]
pub struct MissingIdentity;

impl IntoResponse for MissingIdentity {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "INTERNAL",
            "message": "internal error",
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = MissingIdentity;

    // axum-core defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts.extensions.get::<Identity>().cloned();
        async move { identity.ok_or(MissingIdentity) }
    }
}
