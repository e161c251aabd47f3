//! The event group factory.
//!
//! An [`EventGroup`] correlates a sequence of events under one group id
//! for the lifetime of one logical unit of work (a request, a business
//! transaction). It is purely a scoping object: multiple factories may
//! share the same group id over time, and grouping is by value, not by
//! ownership of the in-memory object.

use rusqlite::Connection;
use uuid::Uuid;

use chronicle_notify::{EventContext, Notifier};
use chronicle_types::EventTypeList;

use crate::error::EventLogError;
use crate::event::{Event, EventData};
use crate::store::{self, NewEvent};

/// Maximum length of a group id, mirroring the stored column width.
pub const MAX_GROUP_ID_LEN: usize = 40;

/// Generates a random opaque correlation id (32 hex characters).
pub fn generate_group_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Construction options for an [`EventGroup`].
#[derive(Debug, Clone, Default)]
pub struct EventGroupOptions {
    /// Externally supplied correlation key. Generated when omitted.
    pub group_id: Option<String>,
    /// Default mail recipient applied to every log call that does not
    /// carry its own.
    pub send_mail: Option<String>,
}

/// Per-call parameters for [`EventGroup::log`].
#[derive(Debug, Clone, Default)]
pub struct LogParams<'a> {
    initiator: Option<&'a str>,
    send_mail: Option<&'a str>,
    data: Option<EventData>,
}

impl<'a> LogParams<'a> {
    /// Parameters with nothing optional set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records who or what triggered the event.
    pub fn initiator(mut self, initiator: &'a str) -> Self {
        self.initiator = Some(initiator);
        self
    }

    /// Sends a notification for this event to the given recipient,
    /// overriding the factory default.
    pub fn send_mail(mut self, recipient: &'a str) -> Self {
        self.send_mail = Some(recipient);
        self
    }

    /// Attaches an encoded structured payload.
    pub fn data(mut self, data: EventData) -> Self {
        self.data = Some(data);
        self
    }
}

/// Factory for events sharing one group id.
///
/// Holds a snapshot of the type registry taken at construction; registry
/// changes made afterwards affect subsequent factories only.
pub struct EventGroup<'a> {
    conn: &'a Connection,
    registry: EventTypeList,
    group_id: String,
    send_mail: Option<String>,
    notifier: Option<&'a Notifier>,
}

impl<'a> EventGroup<'a> {
    /// Creates a factory for the given (or a freshly generated) group id.
    ///
    /// # Errors
    ///
    /// Returns `EventLogError::Validation` immediately when a supplied
    /// group id exceeds [`MAX_GROUP_ID_LEN`] characters, rather than
    /// failing later at insert time.
    pub fn new(
        conn: &'a Connection,
        registry: &EventTypeList,
        options: EventGroupOptions,
    ) -> Result<Self, EventLogError> {
        let group_id = match options.group_id {
            Some(id) => {
                // Counted in characters, matching the column CHECK
                // (SQLite length() counts characters on TEXT).
                let chars = id.chars().count();
                if chars > MAX_GROUP_ID_LEN {
                    return Err(EventLogError::Validation(format!(
                        "group id is {chars} characters, maximum is {MAX_GROUP_ID_LEN}"
                    )));
                }
                id
            }
            None => generate_group_id(),
        };

        Ok(Self {
            conn,
            registry: registry.clone(),
            group_id,
            send_mail: options.send_mail,
            notifier: None,
        })
    }

    /// Attaches a notifier for mail fan-out.
    ///
    /// Without one, a resolved recipient is logged and skipped rather
    /// than failing the log call.
    pub fn with_notifier(mut self, notifier: &'a Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Returns this factory's correlation key.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Logs a new event of the given type.
    ///
    /// Exactly one row is written per successful call. The message is not
    /// validated for emptiness; that leniency is deliberate and matches
    /// the persisted model. If a recipient resolves (per-call wins over
    /// the factory default), the notifier runs synchronously exactly once
    /// after the row write; a notification failure does not roll the row
    /// back.
    ///
    /// # Errors
    ///
    /// Returns `EventLogError::UnknownEventType` when `event_type` is not
    /// in the registry snapshot (no row is written), `Database` on insert
    /// failure, or `Notification` when mail dispatch fails without
    /// fail-silently configured.
    pub fn log(
        &self,
        event_type: &str,
        message: &str,
        params: LogParams<'_>,
    ) -> Result<Event, EventLogError> {
        let Some(registered) = self.registry.by_name(event_type) else {
            return Err(EventLogError::UnknownEventType(event_type.to_string()));
        };
        let type_label = registered.label().to_string();

        let data = params.data.map(EventData::into_string);
        let event = store::create_event(
            self.conn,
            &NewEvent {
                event_type,
                group_id: &self.group_id,
                message,
                data: data.as_deref(),
                initiator: params.initiator,
            },
        )?;

        // Per-call recipient wins over the factory-wide default.
        if let Some(recipient) = params.send_mail.or(self.send_mail.as_deref()) {
            match self.notifier {
                Some(notifier) => {
                    let ctx = EventContext {
                        type_label,
                        message: event.message.clone(),
                        data: event.data.clone(),
                        initiator: event.initiator.clone(),
                        date: event.timestamp.clone(),
                    };
                    notifier.notify(recipient, &ctx)?;
                }
                None => {
                    tracing::warn!(
                        recipient,
                        event_type,
                        "mail recipient configured but no notifier attached, skipping"
                    );
                }
            }
        }

        Ok(event)
    }

    /// Logs an `info` event.
    pub fn info(&self, message: &str) -> Result<Event, EventLogError> {
        self.log("info", message, LogParams::new())
    }

    /// Logs a `warning` event.
    pub fn warning(&self, message: &str) -> Result<Event, EventLogError> {
        self.log("warning", message, LogParams::new())
    }

    /// Logs an `error` event.
    pub fn error(&self, message: &str) -> Result<Event, EventLogError> {
        self.log("error", message, LogParams::new())
    }

    /// Logs a `critical` event.
    pub fn critical(&self, message: &str) -> Result<Event, EventLogError> {
        self.log("critical", message, LogParams::new())
    }
}
