//! Mail delivery via lettre

use crate::config::SmtpConfig;
use crate::contact::ContactMail;
use anyhow::Context;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

/// Seam between the relay endpoint and the actual SMTP transport.
///
/// The process owns exactly one transport instance, built at startup and
/// shared across in-flight requests. Tests substitute a recording fake.
pub trait MailTransport: Send + Sync {
    fn send(&self, mail: &ContactMail) -> anyhow::Result<()>;

    /// Best-effort connectivity probe, run once at startup.
    fn verify(&self) -> bool;
}

/// SMTP-backed transport for contact notifications.
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = if !config.has_credentials() {
            info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.host)
                .port(config.port)
                .build()
        } else {
            let creds = Credentials::new(config.username.clone(), config.password.clone());
            let builder = if config.secure {
                // Implicit TLS (SMTPS)
                SmtpTransport::relay(&config.host)?
            } else {
                SmtpTransport::starttls_relay(&config.host)?
            };
            info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                secure = config.secure,
                "SMTP transport initialized with authentication"
            );
            builder.port(config.port).credentials(creds).build()
        };

        Ok(Self { transport })
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, mail: &ContactMail) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(mail.from.parse().context("Failed to parse from mailbox")?)
            .to(mail.to.parse().context("Failed to parse to mailbox")?)
            .subject(mail.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                mail.text_body.clone(),
                mail.html_body.clone(),
            ))
            .context("Failed to build email message")?;

        self.transport
            .send(&message)
            .context("Failed to send message via SMTP")?;
        Ok(())
    }

    fn verify(&self) -> bool {
        matches!(self.transport.test_connection(), Ok(true))
    }
}
