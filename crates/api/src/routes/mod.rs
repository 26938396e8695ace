pub mod document;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /document                   create (POST)
/// /document/{id}              get (GET), update (POST, PUT)
/// /document/{id}/history      history entries (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/document", document::router())
}
