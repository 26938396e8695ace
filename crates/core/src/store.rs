//! Persistence seam for document aggregates.
//!
//! [`DocumentStore`] is the only storage contract the service depends on.
//! The PostgreSQL implementation lives in `wiki-db`; [`MemoryDocumentStore`]
//! keeps everything in process and backs tests and database-less runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Document, DocumentDraft, ENTITY_DOCUMENT};
use crate::error::CoreError;
use crate::types::DbId;

/// Load/save of whole document aggregates by identifier.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document and return it with its assigned identifier.
    async fn insert(&self, draft: DocumentDraft) -> Result<Document, CoreError>;

    /// Persist an existing document together with any unsaved history entries,
    /// as one unit. Returns the stored aggregate with history ids assigned.
    async fn save(&self, document: Document) -> Result<Document, CoreError>;

    /// Load a document and its full history, or `None` if absent.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Document>, CoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    documents: BTreeMap<DbId, Document>,
    last_document_id: DbId,
    last_history_id: DbId,
}

/// In-process [`DocumentStore`] guarded by a single lock.
///
/// Mirrors the schema's constraints: titles must be non-empty and `save`
/// only accepts documents that were previously inserted.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    state: RwLock<MemoryState>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.state.read().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn check_title(title: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, draft: DocumentDraft) -> Result<Document, CoreError> {
        check_title(&draft.title)?;

        let mut state = self.state.write().await;
        state.last_document_id += 1;
        let id = state.last_document_id;

        let document = Document::assemble(id, draft, []);
        state.documents.insert(id, document.clone());
        Ok(document)
    }

    /// Apply `document`'s fields to the stored copy and append its unsaved
    /// history entries, all under the write lock. History already in the
    /// store is kept even if `document` was loaded before a concurrent save.
    async fn save(&self, document: Document) -> Result<Document, CoreError> {
        check_title(&document.title)?;

        let mut guard = self.state.write().await;
        let MemoryState {
            documents,
            last_history_id,
            ..
        } = &mut *guard;

        let id = document.id();
        let Some(stored) = documents.get_mut(&id) else {
            return Err(CoreError::NotFound {
                entity: ENTITY_DOCUMENT,
                id,
            });
        };

        stored.merge_changes(document);
        for entry in stored.unsaved_history_mut() {
            *last_history_id += 1;
            entry.assign_id(*last_history_id);
        }
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Document>, CoreError> {
        Ok(self.state.read().await.documents.get(&id).cloned())
    }
}
