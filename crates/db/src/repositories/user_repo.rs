//! Repository for the `users` table.

use sqlx::PgExecutor;
use wiki_core::types::DbId;

use crate::models::user::User;

/// Column list for users queries.
const COLUMNS: &str = "id, created_at";

/// Provides create and lookup for user identities.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user identity.
    pub async fn create<'e>(executor: impl PgExecutor<'e>) -> Result<User, sqlx::Error> {
        let query = format!("INSERT INTO users DEFAULT VALUES RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query).fetch_one(executor).await
    }

    /// Find a user by ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
