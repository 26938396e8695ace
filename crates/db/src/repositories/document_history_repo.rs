//! Repository for the `document_history` table.
//!
//! History rows are immutable: there is no update or delete here.

use sqlx::PgExecutor;
use wiki_core::document::DocumentHistory;
use wiki_core::types::DbId;

use crate::models::document::DocumentHistoryRow;

/// Column list for document_history queries.
const COLUMNS: &str = "id, document_id, editor_id, content, edited_at, change_description";

/// Provides append and listing for document history.
pub struct DocumentHistoryRepo;

impl DocumentHistoryRepo {
    /// Write one history entry under its owning document.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        entry: &DocumentHistory,
    ) -> Result<DocumentHistoryRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO document_history
                (document_id, editor_id, content, edited_at, change_description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentHistoryRow>(&query)
            .bind(entry.document_id())
            .bind(entry.editor_id())
            .bind(entry.content())
            .bind(entry.edited_at())
            .bind(entry.change_description())
            .fetch_one(executor)
            .await
    }

    /// List all entries for a document, oldest first.
    pub async fn list_by_document<'e>(
        executor: impl PgExecutor<'e>,
        document_id: DbId,
    ) -> Result<Vec<DocumentHistoryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM document_history
             WHERE document_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, DocumentHistoryRow>(&query)
            .bind(document_id)
            .fetch_all(executor)
            .await
    }
}
