use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Failed to send message")]
    SendFailure(#[source] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingFields => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Missing required fields"})),
            )
                .into_response(),
            AppError::SendFailure(err) => {
                tracing::error!(error = %err, "Error sending contact email");
                // Failure details are returned to the client as a debugging
                // aid; acceptable only outside production.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to send message",
                        "details": err.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
