//! Document and document history rows.

use sqlx::FromRow;
use wiki_core::document::{ContentFormat, Document, DocumentDraft, HistorySnapshot};
use wiki_core::types::{DbId, Timestamp};

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub content_format: String,
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `document_history` table.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentHistoryRow {
    pub id: DbId,
    pub document_id: DbId,
    pub editor_id: Option<DbId>,
    pub content: String,
    pub edited_at: Timestamp,
    pub change_description: String,
}

impl From<DocumentHistoryRow> for HistorySnapshot {
    fn from(row: DocumentHistoryRow) -> Self {
        HistorySnapshot::stored(
            row.id,
            row.editor_id,
            row.content,
            row.edited_at,
            row.change_description,
        )
    }
}

impl DocumentRow {
    /// Rebuild the aggregate from this row and its history rows (oldest first).
    ///
    /// Fails with [`sqlx::Error::Decode`] if the stored format name is unknown.
    pub fn into_document(self, history: Vec<DocumentHistoryRow>) -> Result<Document, sqlx::Error> {
        let content_format = ContentFormat::from_str_db(&self.content_format).ok_or_else(|| {
            sqlx::Error::Decode(
                format!(
                    "Unknown content format '{}' on document {}",
                    self.content_format, self.id
                )
                .into(),
            )
        })?;

        let draft = DocumentDraft {
            title: self.title,
            content: self.content,
            content_format,
            author_id: self.author_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        Ok(Document::assemble(
            self.id,
            draft,
            history.into_iter().map(HistorySnapshot::from),
        ))
    }
}
