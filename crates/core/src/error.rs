use crate::types::DbId;

/// Boxed error used to carry storage backend failures through the domain layer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A failure inside the storage backend. The original error is kept as the
    /// source so the transport layer can classify it.
    #[error("Storage error: {0}")]
    Storage(#[source] BoxError),
}

impl CoreError {
    /// Wrap any backend error as [`CoreError::Storage`].
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}
