use axum::http::StatusCode;

/// `GET /healthz` — liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — readiness probe. A service with startup dependencies can
/// route this to its own handler instead.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
