//! Document lifecycle orchestration.
//!
//! [`DocumentService`] is the single entry point the transport layer calls.
//! It stamps timestamps, applies the default content format, and snapshots the
//! previous content on every update before handing the aggregate to storage.

use std::sync::Arc;

use chrono::Utc;

use crate::document::{Document, DocumentDraft, DocumentHistory, DocumentInput, ENTITY_DOCUMENT};
use crate::error::CoreError;
use crate::store::DocumentStore;
use crate::types::DbId;

/// Create/update/read operations over a [`DocumentStore`].
///
/// Cheaply cloneable; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a new document. Missing `content_format` defaults to Markdown.
    pub async fn create_document(&self, input: DocumentInput) -> Result<Document, CoreError> {
        tracing::info!(title = %input.title, "Creating document");
        if input.content_format.is_none() {
            tracing::debug!("No content format given, defaulting to MARKDOWN");
        }

        let draft = DocumentDraft::for_create(input, Utc::now());
        let document = self.store.insert(draft).await?;

        tracing::info!(document_id = document.id(), "Document created");
        Ok(document)
    }

    /// Replace a document's fields, recording its previous content as history.
    ///
    /// Fails with [`CoreError::NotFound`] without writing anything if `id`
    /// does not exist.
    pub async fn update_document(
        &self,
        id: DbId,
        input: DocumentInput,
    ) -> Result<Document, CoreError> {
        tracing::info!(document_id = id, "Updating document");

        let mut document = self.find_or_not_found(id).await?;
        document.apply_update(input, Utc::now());
        let saved = self.store.save(document).await?;

        tracing::info!(
            document_id = id,
            history_len = saved.history().len(),
            "Document updated"
        );
        Ok(saved)
    }

    /// Fetch a document with its full history.
    pub async fn get_document(&self, id: DbId) -> Result<Document, CoreError> {
        tracing::info!(document_id = id, "Retrieving document");
        let document = self.find_or_not_found(id).await?;
        tracing::debug!(document_id = id, title = %document.title, "Document retrieved");
        Ok(document)
    }

    /// History of a document, oldest first.
    pub async fn get_history(&self, id: DbId) -> Result<Vec<DocumentHistory>, CoreError> {
        let document = self.get_document(id).await?;
        Ok(document.history().to_vec())
    }

    /// Whether the underlying store answers.
    pub async fn is_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Document store health check failed");
                false
            }
        }
    }

    async fn find_or_not_found(&self, id: DbId) -> Result<Document, CoreError> {
        self.store.find_by_id(id).await?.ok_or_else(|| {
            tracing::error!(document_id = id, "Document not found");
            CoreError::NotFound {
                entity: ENTITY_DOCUMENT,
                id,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::document::{ContentFormat, CHANGE_DESCRIPTION_UPDATED};
    use crate::store::MemoryDocumentStore;

    fn setup() -> (DocumentService, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        let service = DocumentService::new(store.clone());
        (service, store)
    }

    fn input(title: &str, content: &str, format: Option<ContentFormat>) -> DocumentInput {
        DocumentInput {
            title: title.to_string(),
            content: content.to_string(),
            content_format: format,
            author_id: None,
        }
    }

    // -- create --------------------------------------------------------------

    #[tokio::test]
    async fn create_defaults_format_to_markdown() {
        let (service, _) = setup();
        let doc = service
            .create_document(input("Test Title", "Test Content", None))
            .await
            .unwrap();

        assert_eq!(doc.title, "Test Title");
        assert_eq!(doc.content_format, ContentFormat::Markdown);
        assert_eq!(doc.created_at, doc.updated_at);
        assert!(doc.history().is_empty());
    }

    #[tokio::test]
    async fn create_keeps_explicit_format() {
        let (service, _) = setup();
        let doc = service
            .create_document(input("T", "C", Some(ContentFormat::Html)))
            .await
            .unwrap();
        assert_eq!(doc.content_format, ContentFormat::Html);
    }

    #[tokio::test]
    async fn create_propagates_storage_rejection() {
        let (service, store) = setup();
        let result = service.create_document(input("", "C", None)).await;
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert!(store.is_empty().await);
    }

    // -- get -----------------------------------------------------------------

    #[tokio::test]
    async fn get_returns_stored_document() {
        let (service, _) = setup();
        let created = service
            .create_document(input("Test Title", "x", None))
            .await
            .unwrap();

        let doc = service.get_document(created.id()).await.unwrap();
        assert_eq!(doc.id(), 1);
        assert_eq!(doc.title, "Test Title");
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let (service, _) = setup();
        assert_matches!(
            service.get_document(42).await,
            Err(CoreError::NotFound { entity: "Document", id: 42 })
        );
    }

    // -- update --------------------------------------------------------------

    #[tokio::test]
    async fn update_adds_history_with_old_content() {
        let (service, _) = setup();
        let existing = service
            .create_document(input("Old Title", "Old Content", Some(ContentFormat::Markdown)))
            .await
            .unwrap();

        let mut payload = input("New Title", "New Content", Some(ContentFormat::Html));
        payload.author_id = Some(3);
        let result = service.update_document(existing.id(), payload).await.unwrap();

        assert_eq!(result.title, "New Title");
        assert_eq!(result.content, "New Content");
        assert_eq!(result.content_format, ContentFormat::Html);
        assert_eq!(result.history().len(), 1);

        let history = &result.history()[0];
        assert_eq!(history.content(), "Old Content");
        assert_eq!(history.document_id(), result.id());
        assert_eq!(history.editor_id(), Some(3));
        assert_eq!(history.change_description(), CHANGE_DESCRIPTION_UPDATED);
        assert!(history.id().is_some());
        assert!(result.updated_at >= result.created_at);
    }

    #[tokio::test]
    async fn update_is_persisted() {
        let (service, _) = setup();
        let existing = service
            .create_document(input("T", "one", None))
            .await
            .unwrap();
        service
            .update_document(existing.id(), input("T", "two", None))
            .await
            .unwrap();

        let loaded = service.get_document(existing.id()).await.unwrap();
        assert_eq!(loaded.content, "two");
        assert_eq!(loaded.history().len(), 1);
        assert_eq!(loaded.history()[0].content(), "one");
    }

    #[tokio::test]
    async fn each_update_appends_exactly_one_entry() {
        let (service, _) = setup();
        let doc = service.create_document(input("T", "v0", None)).await.unwrap();

        for i in 1..=3 {
            let updated = service
                .update_document(doc.id(), input("T", &format!("v{i}"), None))
                .await
                .unwrap();
            assert_eq!(updated.history().len(), i);
            assert_eq!(
                updated.latest_history().unwrap().content(),
                format!("v{}", i - 1)
            );
        }

        let history = service.get_history(doc.id()).await.unwrap();
        let contents: Vec<_> = history.iter().map(|h| h.content()).collect();
        assert_eq!(contents, ["v0", "v1", "v2"]);
        assert!(history.windows(2).all(|w| w[0].edited_at() <= w[1].edited_at()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_each_keep_their_history_entry() {
        const UPDATES: usize = 64;

        let (service, _) = setup();
        let doc = service.create_document(input("T", "v0", None)).await.unwrap();

        let handles: Vec<_> = (0..UPDATES)
            .map(|i| {
                let service = service.clone();
                let id = doc.id();
                tokio::spawn(async move {
                    service
                        .update_document(id, input("T", &format!("v{}", i + 1), None))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let loaded = service.get_document(doc.id()).await.unwrap();
        assert_eq!(loaded.history().len(), UPDATES);
        assert!(loaded.history().iter().all(|h| h.id().is_some()));
        assert!(loaded.history().windows(2).all(|w| w[0].id() < w[1].id()));
    }

    #[tokio::test]
    async fn update_unknown_is_not_found_and_writes_nothing() {
        let (service, store) = setup();
        let result = service
            .update_document(999, input("T", "New Content", None))
            .await;

        assert_matches!(result, Err(CoreError::NotFound { id: 999, .. }));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn failed_update_leaves_stored_state_untouched() {
        let (service, _) = setup();
        let doc = service
            .create_document(input("Keep", "original", None))
            .await
            .unwrap();

        let result = service.update_document(doc.id(), input("", "changed", None)).await;
        assert_matches!(result, Err(CoreError::Validation(_)));

        let loaded = service.get_document(doc.id()).await.unwrap();
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn history_of_unknown_is_not_found() {
        let (service, _) = setup();
        assert_matches!(
            service.get_history(5).await,
            Err(CoreError::NotFound { id: 5, .. })
        );
    }

    #[tokio::test]
    async fn memory_store_is_healthy() {
        let (service, _) = setup();
        assert!(service.is_healthy().await);
    }
}
