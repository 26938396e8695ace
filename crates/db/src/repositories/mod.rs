//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! any PostgreSQL executor (`&PgPool` or `&mut *tx`) as the first argument.

pub mod document_history_repo;
pub mod document_repo;
pub mod user_repo;

pub use document_history_repo::DocumentHistoryRepo;
pub use document_repo::DocumentRepo;
pub use user_repo::UserRepo;
