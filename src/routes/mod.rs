pub mod contact;
pub mod health;

pub use contact::post_contact;
pub use health::health;

use crate::mailer::MailTransport;
use std::sync::Arc;

/// Process-lifetime state shared across requests.
///
/// The transport is initialized once at startup and reused by every in-flight
/// request; lettre handles its own connection concurrency.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn MailTransport>,
    pub target_email: String,
}
