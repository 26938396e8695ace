//! Primitive aliases shared by every crate in the workspace.

/// Identifier assigned by storage (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// UTC instant used for created, updated and edited timestamps.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
