use wiki_core::service::DocumentService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the service holds its store behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document lifecycle service over the configured store.
    pub documents: DocumentService,
}
