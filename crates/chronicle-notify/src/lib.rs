//! Email notification for logged events.
//!
//! A [`Notifier`] renders a subject and body from templates with named
//! placeholders (`{type}`, `{date}`, `{message}`, `{data}`, `{initiator}`),
//! wraps the body as a minimal HTML document alongside the plain-text
//! variant, and hands both to a [`MailTransport`]. The transport seam keeps
//! SMTP out of tests; production code uses [`SmtpMailer`].
//!
//! Delivery is synchronous and blocking relative to the logging call that
//! triggered it. There is no queue and no retry. Transport failures
//! propagate unless `fail_silently` is configured, in which case they are
//! logged at warn level and swallowed.

mod config;
mod render;
mod smtp;

pub use config::NotifyConfig;
pub use render::{linebreaks_html, render};
pub use smtp::{SmtpConfig, SmtpMailer};

use thiserror::Error;

/// Errors that can occur while sending a notification email.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("email build error: {0}")]
    Build(String),
}

/// The rendering input for one notification.
///
/// Deliberately decoupled from the persisted event record so this crate
/// has no dependency on the log core.
#[derive(Debug, Clone)]
pub struct EventContext {
    /// Human readable label of the event type (e.g. "Info").
    pub type_label: String,
    /// The message sent with the event.
    pub message: String,
    /// The encoded data attached to the event, if any.
    pub data: Option<String>,
    /// The initiator string, if any.
    pub initiator: Option<String>,
    /// The timestamp the event was written.
    pub date: String,
}

/// A fully rendered email, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    pub recipients: Vec<String>,
    pub from_address: String,
}

/// The mail-transport seam.
///
/// Implementations deliver one rendered email. [`SmtpMailer`] is the
/// production implementation; tests substitute a recording double.
pub trait MailTransport: Send + Sync {
    /// Delivers the mail, or reports why it could not be delivered.
    fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError>;
}

/// Renders and dispatches notification emails for events.
pub struct Notifier {
    config: NotifyConfig,
    transport: Box<dyn MailTransport>,
}

impl Notifier {
    /// Creates a notifier over the given transport.
    pub fn new(config: NotifyConfig, transport: Box<dyn MailTransport>) -> Self {
        Self { config, transport }
    }

    /// Returns the notifier configuration.
    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Sends one notification email for one event.
    ///
    /// # Errors
    ///
    /// Returns the transport failure unless `fail_silently` is configured,
    /// in which case the failure is logged and discarded.
    pub fn notify(&self, recipient: &str, ctx: &EventContext) -> Result<(), NotifyError> {
        let subject = render(&self.config.subject_template, ctx);
        let text_body = render(&self.config.body_template, ctx);
        let html_body = format!("<html><body>{}</body></html>", linebreaks_html(&text_body));

        let mail = OutgoingMail {
            subject,
            text_body,
            html_body,
            recipients: vec![recipient.to_string()],
            from_address: self.config.from_address.clone(),
        };

        match self.transport.send(&mail) {
            Ok(()) => {
                tracing::info!(recipient, "notification email sent");
                Ok(())
            }
            Err(e) if self.config.fail_silently => {
                tracing::warn!(recipient, error = %e, "notification email failed, suppressed");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every mail it is asked to deliver. Clones share the outbox.
    #[derive(Clone, Default)]
    struct RecordingTransport {
        sent: Arc<Mutex<Vec<OutgoingMail>>>,
    }

    impl RecordingTransport {
        fn outbox(&self) -> Vec<OutgoingMail> {
            self.sent.lock().expect("lock").clone()
        }
    }

    impl MailTransport for RecordingTransport {
        fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
            self.sent.lock().expect("lock").push(mail.clone());
            Ok(())
        }
    }

    struct FailingTransport;

    impl MailTransport for FailingTransport {
        fn send(&self, _mail: &OutgoingMail) -> Result<(), NotifyError> {
            Err(NotifyError::Build("transport is down".to_string()))
        }
    }

    fn ctx() -> EventContext {
        EventContext {
            type_label: "Info".to_string(),
            message: "User signed up".to_string(),
            data: Some("{\"plan\":\"pro\"}".to_string()),
            initiator: Some("signup-form".to_string()),
            date: "2025-01-02 03:04:05".to_string(),
        }
    }

    #[test]
    fn notify_renders_templates_and_sends_once() {
        let transport = RecordingTransport::default();
        let notifier = Notifier::new(NotifyConfig::default(), Box::new(transport.clone()));
        notifier
            .notify("user@example.com", &ctx())
            .expect("notify should succeed");

        let sent = transport.outbox();
        assert_eq!(sent.len(), 1);
        let mail = &sent[0];
        assert_eq!(mail.subject, "Event Log: Info");
        assert!(mail.text_body.contains("User signed up"));
        assert!(mail.text_body.contains("-- signup-form"));
        assert_eq!(mail.recipients, vec!["user@example.com".to_string()]);
        assert!(mail.html_body.starts_with("<html><body>"));
        assert!(mail.html_body.contains("<br>") || mail.html_body.contains("<p>"));
    }

    #[test]
    fn notify_propagates_transport_failure() {
        let config = NotifyConfig {
            fail_silently: false,
            ..NotifyConfig::default()
        };
        let notifier = Notifier::new(config, Box::new(FailingTransport));
        let result = notifier.notify("user@example.com", &ctx());
        assert!(matches!(result, Err(NotifyError::Build(_))));
    }

    #[test]
    fn notify_swallows_failure_when_fail_silently() {
        let config = NotifyConfig {
            fail_silently: true,
            ..NotifyConfig::default()
        };
        let notifier = Notifier::new(config, Box::new(FailingTransport));
        notifier
            .notify("user@example.com", &ctx())
            .expect("failure should be suppressed");
    }

    #[test]
    fn notify_error_display() {
        let err = NotifyError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "email build error: missing body");

        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = NotifyError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("email address parse error"));
    }
}
