use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// `GET /`
///
/// Static acknowledgment that the API is up. Always succeeds.
pub async fn root() -> impl IntoResponse {
    tracing::info!("Root endpoint hit");

    (StatusCode::OK, Json(json!({ "message": "API running" })))
}
