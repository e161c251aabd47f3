//! Error types for the event log core.

use thiserror::Error;

/// Errors that can occur during event log operations.
///
/// Serialization of attached data is deliberately absent: a payload that
/// cannot be serialized degrades to its debug rendering instead of
/// failing the log call.
#[derive(Debug, Error)]
pub enum EventLogError {
    /// A database operation failed.
    #[error("event log database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A caller-supplied value failed validation (e.g. a group id longer
    /// than the stored column allows). Surfaced immediately, never
    /// retried.
    #[error("event log validation error: {0}")]
    Validation(String),

    /// Dispatch was attempted against a type name that is not in the
    /// registry snapshot held by the factory.
    #[error("unknown event type: {0:?}")]
    UnknownEventType(String),

    /// Sending the notification email failed and fail-silently was not
    /// configured. The event row was already written when this occurs.
    #[error("notification error: {0}")]
    Notification(#[from] chronicle_notify::NotifyError),
}
