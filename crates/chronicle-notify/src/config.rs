//! Notification configuration.

use serde::Deserialize;

/// Configuration for rendering and dispatching notification emails.
///
/// Deserializable from TOML so it can live in an application config file.
/// The templates use named placeholders:
///
/// | Placeholder   | Meaning                                         |
/// |---------------|-------------------------------------------------|
/// | `{type}`      | Event type label, such as "Info" or "Warning".  |
/// | `{date}`      | The date and time the event was written.        |
/// | `{message}`   | The message sent with the event.                |
/// | `{data}`      | The encoded data attached to the event.         |
/// | `{initiator}` | The initiator string (optional).                |
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Subject template.
    #[serde(default = "default_subject_template")]
    pub subject_template: String,

    /// Plain-text body template. The HTML body is derived from it.
    #[serde(default = "default_body_template")]
    pub body_template: String,

    /// RFC 5322 "From" address used when sending notifications.
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Swallow transport failures instead of propagating them.
    #[serde(default)]
    pub fail_silently: bool,
}

fn default_subject_template() -> String {
    "Event Log: {type}".to_string()
}

fn default_body_template() -> String {
    "The Event was {type} on {date}\n\n{message}\n\n-- {initiator}".to_string()
}

fn default_from_address() -> String {
    "noreply@localhost".to_string()
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            subject_template: default_subject_template(),
            body_template: default_body_template(),
            from_address: default_from_address(),
            fail_silently: false,
        }
    }
}
