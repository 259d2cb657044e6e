use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "topic-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready as soon as the publisher is constructed; there is no backing
/// store to probe.
pub async fn readiness_check() -> impl IntoResponse {
    StatusCode::OK
}
