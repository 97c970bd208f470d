//! # Database Infrastructure
//!
//! Initializes the [SurrealDB](https://surrealdb.com) connection shared by the checkout
//! services and applies slice-owned schema migrations.
//!
//! ## Key Features
//! - **Engine Agnostic**: `mem://`, `rocksdb://`, `ws://` and `http://` via the `any` engine.
//! - **Resilient Connectivity**: health checks are retried while the engine starts.
//! - **Migrations**: each slice registers versioned scripts; applied ones are tracked with a
//!   checksum in the `migration` table.
//!
//! ## Example
//!
//! ```rust
//! use gc_database::{Database, DatabaseError, Migration};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder()
//!         .url("mem://")
//!         .session("gc", "checkout")
//!         .migration(Migration::new("demo", "0001", "DEFINE TABLE IF NOT EXISTS demo;"))
//!         .init()
//!         .await?;
//!
//!     let _version = db.version().await?;
//!     Ok(())
//! }
//! ```

mod error;
mod migrations;

pub use error::{DatabaseError, DatabaseErrorExt};
pub use migrations::Migration;

use migrations::MigrationRunner;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use tracing::{info, instrument, trace, warn};

const HEALTH_ATTEMPTS: u32 = 3;

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    instance: Surreal<Any>,
    ns: String,
    db: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(ns = %self.ns, db = %self.db, "SurrealDB session handle dropped");
    }
}

/// Cloneable `SurrealDB` handle; derefs to the underlying client.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.ns
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.inner.db
    }
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.inner.instance
    }
}

/// A fluent builder for configuring and establishing a `SurrealDB` connection.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    ns: Option<String>,
    db: Option<String>,
    auth: Option<(String, String)>,
    migrations: Vec<Migration>,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the namespace and database name.
    pub fn session(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.ns = Some(namespace.into());
        self.db = Some(database.into());
        self
    }

    /// Signs in as a root user after connecting.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Registers a migration. Migrations run in registration order.
    pub fn migration(mut self, migration: Migration) -> Self {
        self.migrations.push(migration);
        self
    }

    pub fn migrations(mut self, migrations: impl IntoIterator<Item = Migration>) -> Self {
        self.migrations.extend(migrations);
        self
    }

    /// Connects, waits for the engine to become healthy, activates the session and applies
    /// pending migrations.
    ///
    /// Health checks are attempted three times with a doubling delay starting at 500ms.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if URL, namespace or database is missing.
    /// * [`DatabaseError::Connection`] if the engine fails to start or remains unhealthy.
    /// * [`DatabaseError::Auth`] if the provided credentials are rejected.
    /// * [`DatabaseError::Migration`] if an applied migration was modified.
    /// * [`DatabaseError::Surreal`] for session or query failures.
    #[instrument(skip(self), fields(url = self.url, ns = self.ns, db = self.db))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = self.url.ok_or(DatabaseError::Validation {
            message: "URL is required".into(),
            context: None,
        })?;
        let ns = self.ns.ok_or(DatabaseError::Validation {
            message: "Namespace is required".into(),
            context: None,
        })?;
        let db = self.db.ok_or(DatabaseError::Validation {
            message: "Database is required".into(),
            context: None,
        })?;

        let instance = connect(&url).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some("Initializing engine".into()),
        })?;

        let mut delay = Duration::from_millis(500);
        for attempt in 1..=HEALTH_ATTEMPTS {
            if instance.health().await.is_ok() {
                break;
            }
            if attempt == HEALTH_ATTEMPTS {
                return Err(DatabaseError::Connection {
                    message: "Unhealthy after retries".into(),
                    context: Some(url.into()),
                });
            }
            warn!(attempt, ?delay, "Database not ready, retrying...");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        if let Some((username, password)) = self.auth {
            instance.signin(Root { username, password }).await.map_err(|e| DatabaseError::Auth {
                message: e.to_string().into(),
                context: Some(url.into()),
            })?;
        }

        instance.use_ns(&ns).use_db(&db).await.context("Activating session")?;

        let version =
            instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(namespace = %ns, database = %db, %version, "SurrealDB connection established");

        let report = MigrationRunner::new(&instance).run(&self.migrations).await?;
        for key in &report.skipped {
            trace!(migration = %key, "Skipping migration");
        }
        for key in &report.applied {
            info!(migration = %key, "Applied migration");
        }

        Ok(Database { inner: Arc::new(DatabaseInner { instance, ns, db }) })
    }
}
