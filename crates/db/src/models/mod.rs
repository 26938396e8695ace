//! Row structs matching the database tables.
//!
//! Rows are converted into `wiki_core` domain types at the store boundary;
//! nothing outside this crate sees them.

pub mod document;
pub mod user;
