use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// GET /api/health - Liveness probe
/// Returns 200 OK if the process is alive, regardless of transport state
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
