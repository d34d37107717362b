//! Client-side submission flow
//!
//! The browser form handler re-expressed as an explicit state machine: one
//! submit attempt moves `Idle -> Validating -> Submitting -> Settled`, where
//! validation failures settle without touching the network. Rendering is
//! behind [`FormSurface`]; the HTTP call is behind [`ContactApi`].

pub mod notify;

pub use notify::{Notification, Notifier, Severity};

use crate::contact::is_valid_email;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::warn;

/// Delay before the submit control is restored after an attempt settles.
pub const RESTORE_DELAY: Duration = Duration::from_millis(1500);

pub const MSG_REQUIRED: &str = "Please fill in all required fields";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_SUCCESS_DEFAULT: &str = "Thank you! Your message has been sent.";
pub const MSG_SEND_FAILED: &str = "Failed to send message. Try again later.";
pub const MSG_NETWORK: &str = "Network error. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Settled,
}

/// One form field as collected at submit time.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub required: bool,
    pub is_email: bool,
}

/// The field values of one form instance, in document order.
#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: Vec<FormField>,
}

impl ContactForm {
    /// The contact form as rendered on the site.
    pub fn contact() -> Self {
        let field = |name: &str, required, is_email| FormField {
            name: name.to_string(),
            value: String::new(),
            required,
            is_email,
        };
        Self {
            fields: vec![
                field("fullName", true, false),
                field("email", true, true),
                field("specialty", true, false),
                field("currentWebsite", false, false),
                field("outcome", true, false),
            ],
        }
    }

    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value.to_string();
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// All field values as the JSON object posted to the endpoint, empty
    /// strings included.
    pub fn payload(&self) -> Value {
        let mut object = serde_json::Map::new();
        for field in &self.fields {
            object.insert(field.name.clone(), json!(field.value));
        }
        Value::Object(object)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Names of required fields that are empty after trimming.
    MissingRequired(Vec<String>),
    /// Name of the email field that failed the address pattern.
    InvalidEmail(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    Original,
    Sending,
    Sent,
}

/// Rendering seam for the submit flow: button state, field highlights,
/// form reset.
pub trait FormSurface {
    fn set_button(&mut self, label: ButtonLabel, enabled: bool);
    fn mark_field(&mut self, name: &str, invalid: bool);
    fn reset_form(&mut self);
}

/// Decoded endpoint response as the client sees it.
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    pub ok: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// HTTP seam for the submit flow.
///
/// `Err` means the request never produced an HTTP response (network failure);
/// non-2xx statuses come back as `Ok` with `ok: false`.
pub trait ContactApi {
    fn submit(&self, payload: &Value) -> impl Future<Output = anyhow::Result<ApiResponse>> + Send;
}

/// Production [`ContactApi`] posting JSON to the relay endpoint.
pub struct HttpContactApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContactApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl ContactApi for HttpContactApi {
    async fn submit(&self, payload: &Value) -> anyhow::Result<ApiResponse> {
        let response = self
            .client
            .post(format!("{}/api/contact", self.base_url))
            .json(payload)
            .send()
            .await?;

        let ok = response.status().is_success();
        // An unreadable body is treated as an empty one, same as the page does.
        let body: Value = response.json().await.unwrap_or_else(|_| json!({}));

        Ok(ApiResponse {
            ok,
            message: body.get("message").and_then(Value::as_str).map(str::to_owned),
            error: body.get("error").and_then(Value::as_str).map(str::to_owned),
        })
    }
}

/// Drives the lifecycle of one form-submit interaction.
pub struct SubmissionController<A: ContactApi> {
    api: A,
    notifier: Notifier,
    state: SubmissionState,
}

impl<A: ContactApi> SubmissionController<A> {
    pub fn new(api: A, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Validate a form without side effects.
    pub fn validate(form: &ContactForm) -> Result<(), ValidationFailure> {
        let missing: Vec<String> = form
            .fields()
            .iter()
            .filter(|f| f.required && f.value.trim().is_empty())
            .map(|f| f.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationFailure::MissingRequired(missing));
        }

        if let Some(field) = form.fields().iter().find(|f| f.is_email) {
            if !is_valid_email(&field.value) {
                return Err(ValidationFailure::InvalidEmail(field.name.clone()));
            }
        }

        Ok(())
    }

    /// Run one submit attempt to completion.
    ///
    /// The submit control stays disabled for the whole in-flight window, so a
    /// form instance cannot double-submit; it is restored [`RESTORE_DELAY`]
    /// after the outcome is known. Failures never retry.
    pub async fn submit(&mut self, form: &ContactForm, surface: &mut impl FormSurface) {
        self.state = SubmissionState::Validating;

        match Self::validate(form) {
            Err(ValidationFailure::MissingRequired(missing)) => {
                for field in form.fields() {
                    if field.required {
                        surface.mark_field(&field.name, missing.contains(&field.name));
                    }
                }
                self.notifier.show(MSG_REQUIRED, Severity::Error);
                self.state = SubmissionState::Settled;
                return;
            }
            Err(ValidationFailure::InvalidEmail(name)) => {
                for field in form.fields() {
                    if field.required {
                        surface.mark_field(&field.name, false);
                    }
                }
                surface.mark_field(&name, true);
                self.notifier.show(MSG_INVALID_EMAIL, Severity::Error);
                self.state = SubmissionState::Settled;
                return;
            }
            Ok(()) => {
                for field in form.fields() {
                    if field.required {
                        surface.mark_field(&field.name, false);
                    }
                }
            }
        }

        self.state = SubmissionState::Submitting;
        surface.set_button(ButtonLabel::Sending, false);

        match self.api.submit(&form.payload()).await {
            Ok(response) if response.ok => {
                surface.set_button(ButtonLabel::Sent, false);
                let message = response
                    .message
                    .unwrap_or_else(|| MSG_SUCCESS_DEFAULT.to_string());
                self.notifier.show(message, Severity::Success);
                surface.reset_form();
            }
            Ok(response) => {
                let message = response.error.unwrap_or_else(|| MSG_SEND_FAILED.to_string());
                self.notifier.show(message, Severity::Error);
            }
            Err(err) => {
                warn!(error = %err, "Contact submit failed before a response arrived");
                self.notifier.show(MSG_NETWORK, Severity::Error);
            }
        }

        tokio::time::sleep(RESTORE_DELAY).await;
        surface.set_button(ButtonLabel::Original, true);
        self.state = SubmissionState::Settled;
    }
}
