use axum::http::StatusCode;

/// GET / - Service banner.
pub async fn index() -> &'static str {
    "WebService de Visionary"
}

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
