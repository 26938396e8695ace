//! Route definitions for wiki documents.
//!
//! Registered under `/document`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::document;
use crate::state::AppState;

/// Document routes, registered as `/document`.
///
/// ```text
/// POST   /                create_document
/// GET    /{id}            get_document
/// POST   /{id}            update_document
/// PUT    /{id}            update_document
/// GET    /{id}/history    list_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(document::create_document))
        .route(
            "/{id}",
            get(document::get_document)
                .post(document::update_document)
                .put(document::update_document),
        )
        .route("/{id}/history", get(document::list_history))
}
