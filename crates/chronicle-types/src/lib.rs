//! Event type descriptors and the event type registry.
//!
//! Every event written to the log carries a type name (`info`, `error`,
//! `payment_declined`, ...) that is checked against an [`EventTypeList`]
//! at dispatch time. The registry is built once at application startup and
//! passed by reference into whichever component needs it; there is no
//! ambient global lookup.
//!
//! Rows may outlive their type definition: a persisted event whose type
//! was later removed from the registry is a "legacy" row and is still
//! renderable via [`EventTypeList::label_for`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of an event type name.
pub const MAX_TYPE_NAME_LEN: usize = 50;

/// Error returned when an event type name fails validation.
#[derive(Debug, Clone, Error)]
#[error(
    "invalid event type name {0:?}: must be alphanumeric or underscore, \
     not start with a digit, and be at most 50 characters"
)]
pub struct InvalidTypeName(pub String);

/// A named, labeled category of event.
///
/// The name doubles as the dispatch key on the event group factory, so it
/// must be a valid identifier: `^[A-Za-z_][A-Za-z0-9_]{0,49}$`. Validation
/// happens at construction; an `EventType` that exists is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    name: String,
    label: String,
    /// Foreground CSS color hint for the admin changelist.
    color: Option<String>,
    /// Background CSS color hint for the admin changelist.
    bgcolor: Option<String>,
}

impl EventType {
    /// Creates a new event type descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTypeName`] if `name` is empty, starts with a digit,
    /// contains anything other than ASCII alphanumerics or underscores, or
    /// exceeds 50 characters.
    pub fn new(name: &str, label: &str) -> Result<Self, InvalidTypeName> {
        if !is_valid_type_name(name) {
            return Err(InvalidTypeName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            label: label.to_string(),
            color: None,
            bgcolor: None,
        })
    }

    /// Sets the foreground color hint.
    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Sets the background color hint.
    pub fn with_bgcolor(mut self, bgcolor: &str) -> Self {
        self.bgcolor = Some(bgcolor.to_string());
        self
    }

    /// Returns the dispatch name of this type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the foreground color hint, if any.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the background color hint, if any.
    pub fn bgcolor(&self) -> Option<&str> {
        self.bgcolor.as_deref()
    }

    /// Renders the label as a styled HTML span for admin display.
    ///
    /// Color hints that are absent simply produce no style declaration;
    /// this is a formatting helper with no business logic.
    pub fn styled_label(&self) -> String {
        let mut styles = String::new();
        if let Some(color) = &self.color {
            styles.push_str(&format!("color: {color};"));
        }
        if let Some(bgcolor) = &self.bgcolor {
            if !styles.is_empty() {
                styles.push(' ');
            }
            styles.push_str(&format!("background-color: {bgcolor};"));
        }
        format!(
            "<span class=\"eventType\" style=\"{styles}\">{label}</span>",
            label = self.label
        )
    }
}

/// Checks a candidate type name against `^[A-Za-z_][A-Za-z0-9_]{0,49}$`.
fn is_valid_type_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_TYPE_NAME_LEN {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Ordered registry of event types.
///
/// Built once at configuration time and treated as immutable afterwards.
/// Lookup by name is total: an unknown name yields `None`, never an error.
/// Not designed for concurrent mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeList {
    types: Vec<EventType>,
}

impl EventTypeList {
    /// Creates a registry from a list of types.
    pub fn new(types: Vec<EventType>) -> Self {
        Self { types }
    }

    /// The default registry: `info`, `warning`, `error`, `critical`.
    pub fn defaults() -> Self {
        // The constructors cannot fail for these literal names.
        let types = vec![
            EventType {
                name: "info".to_string(),
                label: "Info".to_string(),
                color: None,
                bgcolor: None,
            },
            EventType {
                name: "warning".to_string(),
                label: "Warning".to_string(),
                color: None,
                bgcolor: None,
            },
            EventType {
                name: "error".to_string(),
                label: "Error".to_string(),
                color: Some("red".to_string()),
                bgcolor: None,
            },
            EventType {
                name: "critical".to_string(),
                label: "Critical".to_string(),
                color: Some("white".to_string()),
                bgcolor: Some("red".to_string()),
            },
        ];
        Self { types }
    }

    /// Adds a type to the registry. Intended for programmatic extension
    /// before first use.
    pub fn register(&mut self, event_type: EventType) {
        self.types.push(event_type);
    }

    /// Looks up a type by its dispatch name.
    pub fn by_name(&self, name: &str) -> Option<&EventType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name(name).is_some()
    }

    /// Iterates over the registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &EventType> {
        self.types.iter()
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns a styled display label for a raw type name.
    ///
    /// Legacy rows whose type is no longer registered fall back to the
    /// capitalized raw name so they stay renderable.
    pub fn label_for(&self, name: &str) -> String {
        match self.by_name(name) {
            Some(t) => t.styled_label(),
            None => capitalize(name),
        }
    }
}

/// Uppercases the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
