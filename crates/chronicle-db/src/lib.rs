//! Database schema for the chronicle event log.
//!
//! Embedded SQL migrations create the `events` table and its indexes.
//! SQLite is the backing store: an audit log for a web application needs
//! a relational table with two indexes, not an external database process.
//! Migrations are compiled into the binary via `include_str!` so the
//! schema ships with the code that depends on it.
//!
//! Connection management is the caller's concern; the log core takes a
//! `&Connection` per call.

mod migrations;

pub use migrations::{run_migrations, MigrationError};
