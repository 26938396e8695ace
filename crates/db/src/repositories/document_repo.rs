//! Repository for the `documents` table.
//!
//! History rows are handled by [`super::DocumentHistoryRepo`]; stitching the
//! two together into an aggregate happens in [`crate::store`].

use sqlx::PgExecutor;
use wiki_core::document::{Document, DocumentDraft};
use wiki_core::types::DbId;

use crate::models::document::DocumentRow;

/// Column list for documents queries.
const COLUMNS: &str = "id, title, content, content_format, author_id, created_at, updated_at";

/// Provides insert, lookup and full-replace update for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new document row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        draft: &DocumentDraft,
    ) -> Result<DocumentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents
                (title, content, content_format, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(draft.content_format.as_str())
            .bind(draft.author_id)
            .bind(draft.created_at)
            .bind(draft.updated_at)
            .fetch_one(executor)
            .await
    }

    /// Find a document row by ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<DocumentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Overwrite every mutable column. `created_at` is never touched.
    ///
    /// Returns `None` if no row has the document's ID.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        document: &Document,
    ) -> Result<Option<DocumentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET
                title = $1,
                content = $2,
                content_format = $3,
                author_id = $4,
                updated_at = $5
             WHERE id = $6
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(&document.title)
            .bind(&document.content)
            .bind(document.content_format.as_str())
            .bind(document.author_id)
            .bind(document.updated_at)
            .bind(document.id())
            .fetch_optional(executor)
            .await
    }
}
