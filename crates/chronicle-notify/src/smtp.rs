//! Blocking SMTP delivery via `lettre`.

use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::Deserialize;

use crate::{MailTransport, NotifyError, OutgoingMail};

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Connection settings for the SMTP relay.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,

    /// SMTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Optional SMTP username.
    #[serde(default)]
    pub user: Option<String>,

    /// Optional SMTP password.
    #[serde(default)]
    pub password: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_SMTP_PORT
}

impl SmtpConfig {
    /// Loads SMTP settings from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and no mailer should be constructed.
    ///
    /// | Variable        | Required | Default |
    /// |-----------------|----------|---------|
    /// | `SMTP_HOST`     | yes      | —       |
    /// | `SMTP_PORT`     | no       | `587`   |
    /// | `SMTP_USER`     | no       | —       |
    /// | `SMTP_PASSWORD` | no       | —       |
    pub fn from_env() -> Option<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let host = get("SMTP_HOST")?;
        Some(Self {
            host,
            port: get("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            user: get("SMTP_USER"),
            password: get("SMTP_PASSWORD"),
        })
    }
}

/// Delivers rendered mails over a blocking STARTTLS SMTP connection.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Creates a mailer with the given SMTP settings.
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        let mut builder = Message::builder()
            .from(mail.from_address.parse()?)
            .subject(mail.subject.clone());
        for recipient in &mail.recipients {
            builder = builder.to(recipient.parse()?);
        }

        let message = builder
            .multipart(MultiPart::alternative_plain_html(
                mail.text_body.clone(),
                mail.html_body.clone(),
            ))
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        let mut transport_builder = SmtpTransport::starttls_relay(&self.config.host)?
            .port(self.config.port);

        if let (Some(user), Some(pass)) = (&self.config.user, &self.config.password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(&message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vars_returns_none_without_smtp_host() {
        assert!(SmtpConfig::from_vars(|_| None).is_none());
    }

    #[test]
    fn from_vars_reads_host_and_defaults_the_rest() {
        let config = SmtpConfig::from_vars(|name| match name {
            "SMTP_HOST" => Some("mail.example.com".to_string()),
            _ => None,
        })
        .expect("host is set");
        assert_eq!(config.host, "mail.example.com");
        assert_eq!(config.port, 587);
        assert!(config.user.is_none());

        let config = SmtpConfig::from_vars(|name| match name {
            "SMTP_HOST" => Some("mail.example.com".to_string()),
            "SMTP_PORT" => Some("2525".to_string()),
            "SMTP_USER" => Some("mailer".to_string()),
            _ => None,
        })
        .expect("host is set");
        assert_eq!(config.port, 2525);
        assert_eq!(config.user.as_deref(), Some("mailer"));
    }

    #[test]
    fn deserializes_with_default_port() {
        let config: SmtpConfig = toml::from_str(r#"host = "mail.example.com""#)
            .expect("should deserialize");
        assert_eq!(config.host, "mail.example.com");
        assert_eq!(config.port, 587);
        assert!(config.user.is_none());
    }
}
