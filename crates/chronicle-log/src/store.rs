//! Persistence operations for the event log.
//!
//! All writes go through [`create_event`], which inserts one row and lets
//! SQLite assign the timestamp. Reads go through [`events_for_group`],
//! which returns a group's rows in time order with ties broken by
//! insertion order. [`purge_events`] is the only delete path; individual
//! rows are never removed or updated.

use rusqlite::{params, Connection};

use crate::error::EventLogError;
use crate::event::Event;

/// Parameters for writing a single event row.
#[derive(Debug, Clone)]
pub struct NewEvent<'a> {
    /// The event type name. Must be registry-checked by the caller.
    pub event_type: &'a str,
    /// The correlation key. At most 40 characters.
    pub group_id: &'a str,
    /// Free-text message.
    pub message: &'a str,
    /// Already-encoded structured payload, if any.
    pub data: Option<&'a str>,
    /// Who or what triggered the event. At most 500 characters.
    pub initiator: Option<&'a str>,
}

/// Writes a single event row.
///
/// The timestamp is assigned by the store via `datetime('now')` so that
/// ordering within a group reflects insert order as seen by the database.
///
/// # Errors
///
/// Returns `EventLogError::Database` on SQL failure (including column
/// constraint violations).
pub fn create_event(conn: &Connection, new: &NewEvent<'_>) -> Result<Event, EventLogError> {
    let (id, timestamp): (i64, String) = conn.query_row(
        "INSERT INTO events (event_type, group_id, message, data, initiator)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id, timestamp",
        params![new.event_type, new.group_id, new.message, new.data, new.initiator],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    tracing::debug!(
        event_type = new.event_type,
        group_id = new.group_id,
        id,
        "event written"
    );

    Ok(Event {
        id,
        event_type: new.event_type.to_string(),
        group_id: new.group_id.to_string(),
        timestamp,
        message: new.message.to_string(),
        data: new.data.map(str::to_string),
        initiator: new.initiator.map(str::to_string),
    })
}

/// Returns all events in a group, ascending by timestamp.
///
/// Rows written within the same second share a timestamp; the row id
/// breaks the tie so ordering stays stable.
///
/// # Errors
///
/// Returns `EventLogError::Database` on SQL failure.
pub fn events_for_group(conn: &Connection, group_id: &str) -> Result<Vec<Event>, EventLogError> {
    let mut stmt = conn.prepare(
        "SELECT id, event_type, group_id, timestamp, message, data, initiator
         FROM events
         WHERE group_id = ?1
         ORDER BY timestamp ASC, id ASC",
    )?;

    let rows = stmt.query_map([group_id], |row| {
        Ok(Event {
            id: row.get(0)?,
            event_type: row.get(1)?,
            group_id: row.get(2)?,
            timestamp: row.get(3)?,
            message: row.get(4)?,
            data: row.get(5)?,
            initiator: row.get(6)?,
        })
    })?;

    let mut events = Vec::new();
    for row in rows {
        events.push(row?);
    }

    Ok(events)
}

/// Deletes all events strictly older than `days` days, returning the
/// number of rows removed.
///
/// # Errors
///
/// Returns `EventLogError::Database` on SQL failure.
pub fn purge_events(conn: &Connection, days: u32) -> Result<usize, EventLogError> {
    let count = conn.execute(
        "DELETE FROM events WHERE timestamp < datetime('now', ?1)",
        [format!("-{days} days")],
    )?;

    if count > 0 {
        tracing::info!(count, days, "purged old events");
    } else {
        tracing::debug!(days, "no events old enough to purge");
    }

    Ok(count)
}

/// Computes the delay annotation between consecutive events.
///
/// Returns one entry per input event: `None` for the first event (and for
/// any row whose timestamp cannot be parsed), otherwise the formatted
/// elapsed time since the previous event. Intended for the admin UI to
/// render alongside a group's ordered rows.
pub fn annotate_delays(events: &[Event]) -> Vec<Option<String>> {
    let mut annotations = Vec::with_capacity(events.len());
    let mut previous = None;

    for event in events {
        let parsed = event.timestamp_parsed();
        let annotation = match (previous, parsed) {
            (Some(prev), Some(cur)) => Some(crate::duration::difference(prev, cur)),
            _ => None,
        };
        annotations.push(annotation);
        if parsed.is_some() {
            previous = parsed;
        }
    }

    annotations
}
