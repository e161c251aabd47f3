//! The persisted event record and best-effort payload encoding.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used by SQLite's `datetime('now')`.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single row from the `events` table.
///
/// Rows are immutable once written. The `event_type` corresponded to a
/// registry entry at write time, but the registry may evolve afterwards;
/// readers must tolerate such "legacy" rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Auto-incremented row ID.
    pub id: i64,
    /// The event type name, e.g. `info`.
    pub event_type: String,
    /// The correlation key linking this row to its group.
    pub group_id: String,
    /// Timestamp assigned by the store at creation (ISO 8601, UTC).
    pub timestamp: String,
    /// Free-text message.
    pub message: String,
    /// Encoded structured payload, if any.
    pub data: Option<String>,
    /// Who or what triggered the event, if recorded.
    pub initiator: Option<String>,
}

impl Event {
    /// Parses the stored timestamp. Returns `None` for rows whose
    /// timestamp text is not in the store's format.
    pub fn timestamp_parsed(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Structured payload attached to an event, already encoded for storage.
///
/// Encoding is best-effort by design: a value that fails JSON
/// serialization is stored as its debug rendering instead. Logging must
/// never fail because the caller passed an awkward payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventData(String);

impl EventData {
    /// Encodes a value as JSON, falling back to the `Debug` rendering.
    pub fn encode<T: Serialize + std::fmt::Debug>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(json) => Self(json),
            Err(_) => Self(format!("{value:?}")),
        }
    }

    /// Returns the encoded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the payload, returning the encoded text.
    pub fn into_string(self) -> String {
        self.0
    }
}
