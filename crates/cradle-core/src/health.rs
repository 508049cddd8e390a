use axum::http::StatusCode;

/// Liveness probe: the process is up and serving.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe. The in-memory backend is ready the moment the
/// process is, so readiness currently mirrors liveness; a persistent
/// backend would check its connection here.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
