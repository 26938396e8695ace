//! Extractors that report rejections through [`AppError`].
//!
//! Axum's stock `Json` and `Path` reject with plain-text bodies; these wrappers
//! keep every error in the `{ "error", "code" }` JSON shape.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::error::AppError;

/// `axum::Json` with JSON error responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with JSON error responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
