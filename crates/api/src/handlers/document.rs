//! Handlers for wiki documents.
//!
//! Create, read and full-replace update, plus read-only access to the
//! history snapshots each update leaves behind.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use wiki_core::document::{validate_input, DocumentInput};
use wiki_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /document
///
/// Create a new document. `content_format` defaults to `MARKDOWN`.
pub async fn create_document(
    State(state): State<AppState>,
    AppJson(input): AppJson<DocumentInput>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input).map_err(AppError::Core)?;

    let document = state.documents.create_document(input).await?;

    tracing::info!(
        document_id = document.id(),
        title = %document.title,
        "Document created via API"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// GET /document/{id}
///
/// Fetch a document with its full history.
pub async fn get_document(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let document = state.documents.get_document(id).await?;
    Ok(Json(DataResponse { data: document }))
}

/// POST|PUT /document/{id}
///
/// Replace a document's title, content, format and author. The previous
/// content is kept as a history entry.
pub async fn update_document(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<DocumentInput>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input).map_err(AppError::Core)?;

    let document = state.documents.update_document(id, input).await?;

    tracing::info!(
        document_id = id,
        history_len = document.history().len(),
        "Document updated via API"
    );

    Ok(Json(DataResponse { data: document }))
}

/// GET /document/{id}/history
///
/// List the history entries of a document, oldest first.
pub async fn list_history(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let history = state.documents.get_history(id).await?;
    Ok(Json(DataResponse { data: history }))
}
