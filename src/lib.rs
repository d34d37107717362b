pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod images;
pub mod mailer;
pub mod observability;
pub mod routes;

pub use routes::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Create the app router
///
/// Used by the `serve` command and by integration tests, which drive the
/// router directly without binding a socket.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/contact", post(routes::post_contact))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
