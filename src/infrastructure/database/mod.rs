//! SQLite access: pool setup, migrations, bounded calls and error translation.

pub mod id_allocator;
pub mod repositories;

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::domain::repositories::RepositoryError;

pub use id_allocator::IdTable;

const UNIQUE_FAILED: &str = "UNIQUE constraint failed: ";

/// Pooled store handle shared by the repositories
///
/// Each call acquires a connection, runs one statement and releases it; the
/// whole call is bounded by `query_timeout`.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl Database {
    /// Open the pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(config.query_timeout);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout);

        // Every in-memory connection is its own database, so keep exactly one alive
        let pool_options = if config.is_in_memory() {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;

        Ok(Self::from_pool(pool, config.query_timeout))
    }

    pub fn from_pool(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Run one store call under the configured time bound
    pub(crate) async fn run<T, F>(&self, op: &'static str, call: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                let err = map_sqlx_error(e);
                tracing::warn!("Store call {} failed: {}", op, err);
                Err(err)
            }
            Err(_) => {
                tracing::warn!("Store call {} timed out after {:?}", op, self.query_timeout);
                Err(RepositoryError::Timeout(format!(
                    "{} after {:?}",
                    op, self.query_timeout
                )))
            }
        }
    }
}

/// Translate a sqlx error into a repository error
pub fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::PoolTimedOut => {
            RepositoryError::Timeout("waiting for a database connection".to_string())
        }
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() || db_err.message().contains(UNIQUE_FAILED) =>
        {
            classify_unique_violation(db_err.message())
        }
        _ => RepositoryError::StoreUnavailable(err.to_string()),
    }
}

/// A collision on an allocated primary key is a lost allocation race; any other
/// unique violation is a duplicate row.
fn classify_unique_violation(message: &str) -> RepositoryError {
    let target = unique_target(message).unwrap_or(message);

    match IdTable::from_qualified_column(target) {
        Some(table) => RepositoryError::ConflictOnAllocate(table.qualified_column()),
        None => RepositoryError::AlreadyExists(target.to_string()),
    }
}

/// Extract `table.column[, table.column]` from "UNIQUE constraint failed: ..."
fn unique_target(message: &str) -> Option<&str> {
    let start = message.find(UNIQUE_FAILED)? + UNIQUE_FAILED.len();
    let target = message[start..].lines().next()?.trim();
    (!target.is_empty()).then_some(target)
}
