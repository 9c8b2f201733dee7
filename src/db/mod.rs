//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: records as stored and as served over HTTP
//! - `patch.rs`: write-side shapes (creates, patches, upserts)
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the `AdvisingStorage` handle over a SQLite pool

pub mod models;
pub mod patch;
pub mod schema;
pub mod sqlite;

pub use models::{AdvisingSession, EmailTemplate, Period, Setting, Student, UpsertOutcome};
pub use schema::SQLITE_INIT;
pub use sqlite::{AdvisingStorage, SqlitePool};
