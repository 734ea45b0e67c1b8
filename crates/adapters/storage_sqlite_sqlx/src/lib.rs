//! # crm-automations-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `DocumentStore` port defined in `crm-automations-app::ports`
//! - Manage the `SQLite` connection pool lifecycle
//! - Keep one table of JSON documents per collection
//!
//! ## Dependency rule
//! Depends on `crm-automations-app` (for the port trait) and
//! `crm-automations-domain` (for ids and errors). The `app` and `domain`
//! crates must never reference this adapter.

pub mod document_store;
pub mod error;
pub mod pool;

pub use document_store::SqliteDocumentStore;
pub use error::StorageError;
pub use pool::{Config, Database};
