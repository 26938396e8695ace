//! sqlx-backed [`DocumentStore`].

use async_trait::async_trait;
use wiki_core::document::{Document, DocumentDraft, ENTITY_DOCUMENT};
use wiki_core::error::CoreError;
use wiki_core::store::DocumentStore;
use wiki_core::types::DbId;

use crate::repositories::{DocumentHistoryRepo, DocumentRepo};
use crate::DbPool;

/// Stores document aggregates across the `documents` and `document_history`
/// tables.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, draft: DocumentDraft) -> Result<Document, CoreError> {
        let row = DocumentRepo::create(&self.pool, &draft)
            .await
            .map_err(CoreError::storage)?;
        row.into_document(Vec::new()).map_err(CoreError::storage)
    }

    /// Update the document row and append its unsaved history entries in one
    /// transaction, then read the committed history back.
    async fn save(&self, document: Document) -> Result<Document, CoreError> {
        let mut tx = self.pool.begin().await.map_err(CoreError::storage)?;

        let id = document.id();
        let Some(row) = DocumentRepo::update(&mut *tx, &document)
            .await
            .map_err(CoreError::storage)?
        else {
            return Err(CoreError::NotFound {
                entity: ENTITY_DOCUMENT,
                id,
            });
        };

        let mut written = 0usize;
        for entry in document.unsaved_history() {
            DocumentHistoryRepo::create(&mut *tx, entry)
                .await
                .map_err(CoreError::storage)?;
            written += 1;
        }

        let history = DocumentHistoryRepo::list_by_document(&mut *tx, id)
            .await
            .map_err(CoreError::storage)?;

        tx.commit().await.map_err(CoreError::storage)?;

        tracing::debug!(
            document_id = id,
            history_written = written,
            "Document aggregate saved"
        );

        row.into_document(history).map_err(CoreError::storage)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Document>, CoreError> {
        let Some(row) = DocumentRepo::find_by_id(&self.pool, id)
            .await
            .map_err(CoreError::storage)?
        else {
            return Ok(None);
        };

        let history = DocumentHistoryRepo::list_by_document(&self.pool, id)
            .await
            .map_err(CoreError::storage)?;

        row.into_document(history)
            .map(Some)
            .map_err(CoreError::storage)
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(CoreError::storage)
    }
}
