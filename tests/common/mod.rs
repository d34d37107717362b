//! Shared helpers for integration tests

use axum::Router;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use webstr::contact::ContactMail;
use webstr::mailer::MailTransport;
use webstr::routes::AppState;

pub const TEST_TARGET: &str = "inbox@webstr.example";

/// Transport fake that records sent mail or fails on demand.
pub struct RecordingMailer {
    sent: Mutex<Vec<ContactMail>>,
    fail_with: Option<String>,
}

impl RecordingMailer {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_with: None,
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(reason.to_string()),
        })
    }

    pub fn sent(&self) -> Vec<ContactMail> {
        self.sent.lock().unwrap().clone()
    }
}

impl MailTransport for RecordingMailer {
    fn send(&self, mail: &ContactMail) -> anyhow::Result<()> {
        if let Some(reason) = &self.fail_with {
            anyhow::bail!("{reason}");
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }

    fn verify(&self) -> bool {
        self.fail_with.is_none()
    }
}

pub fn test_app(mailer: Arc<RecordingMailer>) -> Router {
    webstr::create_app(AppState {
        mailer,
        target_email: TEST_TARGET.to_string(),
    })
}

pub fn valid_body() -> Value {
    json!({
        "fullName": "Ada Lovelace",
        "email": "ada@example.com",
        "specialty": "Leadership coaching",
        "currentWebsite": "https://ada.example",
        "outcome": "A site that books calls.\nLess admin.",
    })
}
