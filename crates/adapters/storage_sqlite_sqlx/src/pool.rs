//! `SQLite` connection pool setup and store handle construction.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crm_automations_app::store::StoreHandle;

use crate::document_store::SqliteDocumentStore;
use crate::error::StorageError;

const MEMORY_NAME: &str = "memory";
const FALLBACK_NAME: &str = "default";

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:crm.db?mode=rwc` or `sqlite::memory:`).
    pub database_url: String,
    /// Logical database name. Derived from the URL when absent.
    pub database_name: Option<String>,
}

impl Config {
    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool and the database file if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is malformed or the connection fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        let name = self
            .database_name
            .unwrap_or_else(|| derive_name(&self.database_url));
        Database::initialize(&self.database_url, name).await
    }

    /// Connect and wrap the result in a [`StoreHandle`].
    ///
    /// A missing configuration or a failed connection yields an unavailable
    /// handle instead of an error.
    pub async fn connect(config: Option<Self>) -> StoreHandle<SqliteDocumentStore> {
        let Some(config) = config else {
            tracing::warn!("no database URL configured, document store unavailable");
            return StoreHandle::unconfigured();
        };
        match config.build().await {
            Ok(db) => {
                tracing::info!(database = db.name(), "document store connected");
                StoreHandle::connected(db.into_store())
            }
            Err(err) => {
                let reason = describe(&err);
                tracing::warn!(error = %reason, "document store unavailable");
                StoreHandle::failed(reason)
            }
        }
    }
}

/// Holds the `SQLite` connection pool and the logical database name.
pub struct Database {
    pool: SqlitePool,
    name: String,
}

impl Database {
    /// Open the pool.
    ///
    /// In-memory databases live as long as their connection, so they get a
    /// single connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is malformed or the connection fails.
    async fn initialize(database_url: &str, name: String) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool_options = if is_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = pool_options.connect_with(options).await?;

        Ok(Self { pool, name })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Logical database name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Turn this database into a document store.
    #[must_use]
    pub fn into_store(self) -> SqliteDocumentStore {
        SqliteDocumentStore::new(self.pool, self.name)
    }
}

fn is_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Derive a database name from a URL: the file stem, or `memory`.
fn derive_name(url: &str) -> String {
    if is_memory(url) {
        return MEMORY_NAME.to_string();
    }
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}

fn describe(err: &StorageError) -> String {
    match err {
        StorageError::Database(source) => source.to_string(),
        other => other.to_string(),
    }
}
