//! Structured event logging for web applications.
//!
//! Persists event records (type, group, message, timestamp, optional
//! structured data, optional initiator) to a relational store and
//! optionally sends an email notification per event. This is an
//! audit/activity log browsable through an administrative surface, not an
//! observability or telemetry pipeline: one log call is one row insert,
//! synchronous, with no queue and no retry.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chronicle_log::{EventGroup, EventGroupOptions, LogParams, EventData};
//! use chronicle_types::EventTypeList;
//!
//! let registry = EventTypeList::defaults();
//! let group = EventGroup::new(&conn, &registry, EventGroupOptions::default())?;
//!
//! group.info("Password reset requested")?;
//! group.log(
//!     "warning",
//!     "Unusual login location",
//!     LogParams::new()
//!         .initiator("auth-service")
//!         .data(EventData::encode(&serde_json::json!({"country": "NZ"}))),
//! )?;
//! ```
//!
//! Dispatch is explicit: `log` checks the type name against the registry
//! snapshot and fails with [`EventLogError::UnknownEventType`] before
//! anything is written. The `info`/`warning`/`error`/`critical` wrappers
//! cover the default registry.

pub mod duration;
mod error;
mod event;
mod group;
mod store;

pub use error::EventLogError;
pub use event::{Event, EventData};
pub use group::{
    generate_group_id, EventGroup, EventGroupOptions, LogParams, MAX_GROUP_ID_LEN,
};
pub use store::{annotate_delays, create_event, events_for_group, purge_events, NewEvent};
