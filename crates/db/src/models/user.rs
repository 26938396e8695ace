use sqlx::FromRow;
use wiki_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub created_at: Timestamp,
}
