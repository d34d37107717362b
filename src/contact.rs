//! Contact submission record and mail composition

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Check an address against the form-level email pattern.
///
/// The relay endpoint itself only checks field presence; this pattern is the
/// client-side UX gate and deliberately loose (anything that looks like
/// `local@domain.tld` without whitespace).
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}

/// One contact form submission, created at submit time and never persisted.
///
/// Field names on the wire are the camelCase names the form posts. Missing
/// required fields deserialize to empty strings so presence and emptiness
/// collapse into the same validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub full_name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_website: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub outcome: String,
}

impl ContactSubmission {
    /// True when the four required fields are all non-empty.
    pub fn has_required_fields(&self) -> bool {
        self.validate().is_ok()
    }
}

/// A composed contact email, ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl ContactMail {
    /// Compose the notification email for one submission.
    ///
    /// The HTML variant carries the outcome with newlines as `<br>`; field
    /// values are embedded as-is, matching the wire behavior the site admins
    /// expect in their inbox.
    pub fn compose(submission: &ContactSubmission, target: &str) -> Self {
        let website = submission
            .current_website
            .as_deref()
            .filter(|w| !w.is_empty())
            .unwrap_or("N/A");

        let from = format!("{} <{}>", submission.full_name, submission.email);
        let subject = format!("New contact from website — {}", submission.full_name);

        let text_body = format!(
            "Name: {}\nEmail: {}\nSpecialty: {}\nWebsite: {}\n\nOutcome:\n{}",
            submission.full_name, submission.email, submission.specialty, website, submission.outcome
        );

        let html_body = format!(
            "<p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Specialty:</strong> {}</p>\n\
             <p><strong>Website:</strong> {}</p>\n\
             <hr>\n\
             <p><strong>Outcome:</strong></p>\n\
             <p>{}</p>",
            submission.full_name,
            submission.email,
            submission.specialty,
            website,
            submission.outcome.replace('\n', "<br>")
        );

        Self {
            from,
            to: target.to_string(),
            subject,
            text_body,
            html_body,
        }
    }
}
