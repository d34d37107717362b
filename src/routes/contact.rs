use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::{debug, info};

use crate::contact::{ContactMail, ContactSubmission};
use crate::error::AppError;
use crate::routes::AppState;

/// POST /api/contact - relay one form submission to email
///
/// Presence of the four required fields is re-checked here regardless of what
/// the client validated; the endpoint is the authority. Empty strings count
/// as missing.
pub async fn post_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            debug!(rejection = %rejection, "Rejected unreadable contact payload");
            return Err(AppError::MissingFields);
        }
    };

    if !submission.has_required_fields() {
        return Err(AppError::MissingFields);
    }

    let mail = ContactMail::compose(&submission, &state.target_email);
    state.mailer.send(&mail).map_err(AppError::SendFailure)?;

    info!(
        from = %submission.email,
        to = %state.target_email,
        "Contact email sent"
    );

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Message sent successfully"})),
    ))
}
