//! Database context managing the connection pool and repository access.
//!
//! Provides a unified entry point for database operations. Supports both
//! SQLite (via SyncConnectionWrapper) and PostgreSQL backends.

use std::path::Path;
use std::time::Duration;

use diesel_async::{RunQueryDsl, SimpleAsyncConnection};

use super::checks::CheckRepository;
use super::pool::{DbError, DbPool, SqliteConn};
use super::urls::UrlRepository;
use crate::{with_conn, with_conn_split};

#[cfg(feature = "postgres")]
use diesel_async::AsyncPgConnection;

/// Connection attempts made before giving up on the database.
pub const DB_CONNECT_ATTEMPTS: u32 = 5;

/// Pause between database connection attempts.
pub const DB_CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Database context that manages the connection pool and provides
/// repository access.
///
/// Create one context per command or service, then use it to reach the
/// repositories.
///
/// # Example
/// ```ignore
/// let ctx = DbContext::from_url("pagecheck.sqlite")?;
/// ctx.init_schema().await?;
/// let urls = ctx.urls().list_all().await?;
/// ```
#[derive(Clone)]
pub struct DbContext {
    pool: DbPool,
}

impl DbContext {
    /// Open a context over a SQLite file.
    pub fn new(db_path: &Path) -> Self {
        Self {
            pool: DbPool::sqlite_from_path(db_path),
        }
    }

    /// Open a context from a database URL, picking the backend by its
    /// scheme: `postgres(ql)://` for PostgreSQL, anything else is a
    /// SQLite path (with or without a `sqlite:` prefix).
    pub fn from_url(database_url: &str) -> Result<Self, DbError> {
        Ok(Self {
            pool: DbPool::from_url(database_url)?,
        })
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Get a tracked URL repository.
    pub fn urls(&self) -> UrlRepository {
        UrlRepository::new(self.pool.clone())
    }

    /// Get a page check repository.
    pub fn checks(&self) -> CheckRepository {
        CheckRepository::new(self.pool.clone())
    }

    /// Run one trivial query to confirm the database is reachable.
    pub async fn ping(&self) -> Result<(), DbError> {
        with_conn!(self.pool, conn => {
            diesel::sql_query("SELECT 1").execute(&mut conn).await.map(|_| ())
        })
    }

    /// Ping until the database answers, retrying on a fixed delay.
    ///
    /// The final attempt's error is returned when the database never
    /// becomes reachable.
    pub async fn wait_until_ready(&self, attempts: u32, delay: Duration) -> Result<(), DbError> {
        for attempt in 1..attempts {
            match self.ping().await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        "database not reachable (attempt {}/{}): {}",
                        attempt,
                        attempts,
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
        self.ping().await
    }

    /// Create the tables and index when they do not exist yet. Safe to
    /// run repeatedly.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        with_conn_split!(self.pool,
            sqlite: conn => {
                Self::init_sqlite_schema(&mut conn).await
            },
            postgres: conn => {
                Self::init_postgres_schema(&mut conn).await
            }
        )
    }

    async fn init_sqlite_schema(conn: &mut SqliteConn) -> Result<(), DbError> {
        conn.batch_execute(
            r#"
            -- Tracked URLs table
            CREATE TABLE IF NOT EXISTS urls (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            );

            -- Page checks table
            CREATE TABLE IF NOT EXISTS url_checks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url_id INTEGER NOT NULL,
                status_code INTEGER,
                h1 TEXT NOT NULL DEFAULT '',
                title TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                FOREIGN KEY (url_id) REFERENCES urls(id)
            );

            CREATE INDEX IF NOT EXISTS idx_url_checks_url ON url_checks(url_id);
            "#,
        )
        .await?;

        Ok(())
    }

    #[cfg(feature = "postgres")]
    async fn init_postgres_schema(conn: &mut AsyncPgConnection) -> Result<(), DbError> {
        let statements = [
            r#"CREATE TABLE IF NOT EXISTS urls (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )"#,
            r#"CREATE TABLE IF NOT EXISTS url_checks (
                id SERIAL PRIMARY KEY,
                url_id INTEGER NOT NULL REFERENCES urls(id),
                status_code INTEGER,
                h1 TEXT NOT NULL DEFAULT '',
                title TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )"#,
            "CREATE INDEX IF NOT EXISTS idx_url_checks_url ON url_checks(url_id)",
        ];

        for stmt in statements {
            diesel::sql_query(stmt).execute(conn).await?;
        }

        Ok(())
    }
}
