//! Domain layer for the wiki document backend.
//!
//! Holds the document aggregate and its history-snapshot rules, the
//! [`store::DocumentStore`] persistence seam, and the [`service::DocumentService`]
//! that orchestrates create/update/read. Nothing in here knows about HTTP or SQL.

pub mod document;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
