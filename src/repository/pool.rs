//! Connection pooling over the two supported backends.
//!
//! A single [`DbPool`] value serves both SQLite and PostgreSQL; the
//! backend is chosen at runtime from the database URL, and repository
//! code dispatches through the [`with_conn!`]/[`with_conn_split!`]
//! macros so the same Diesel DSL runs against either.

use std::path::Path;

use diesel::sqlite::SqliteConnection;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::AsyncConnection;

#[cfg(feature = "postgres")]
use diesel_async::pooled_connection::deadpool::Pool as DeadPool;
#[cfg(feature = "postgres")]
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
#[cfg(feature = "postgres")]
use diesel_async::AsyncPgConnection;

use super::util::{is_postgres_url, to_diesel_error};

/// Error type of every repository operation.
pub type DbError = diesel::result::Error;

/// Async SQLite connection type.
pub type SqliteConn = SyncConnectionWrapper<SqliteConnection>;

/// Async PostgreSQL connection type.
#[cfg(feature = "postgres")]
pub type PgConn = deadpool::managed::Object<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Connections held by a PostgreSQL pool.
#[cfg(feature = "postgres")]
const PG_POOL_SIZE: usize = 10;

/// SQLite "pool": connections are file handles cheap enough to open per
/// operation, so only the path is held.
#[derive(Clone)]
pub struct SqlitePool {
    path: String,
}

impl SqlitePool {
    /// Accepts a bare path or a `sqlite:` URL.
    pub fn new(database_url: &str) -> Self {
        let path = database_url
            .strip_prefix("sqlite:")
            .unwrap_or(database_url);
        Self {
            path: path.to_string(),
        }
    }

    /// Create a pool over a SQLite file path.
    pub fn from_path(path: &Path) -> Self {
        Self::new(&path.display().to_string())
    }

    /// Open a fresh connection to the file.
    pub async fn get(&self) -> Result<SqliteConn, DbError> {
        SqliteConn::establish(&self.path)
            .await
            .map_err(to_diesel_error)
    }
}

/// Bounded PostgreSQL connection pool.
#[cfg(feature = "postgres")]
#[derive(Clone)]
pub struct PgPool {
    pool: DeadPool<AsyncPgConnection>,
}

#[cfg(feature = "postgres")]
impl PgPool {
    pub fn new(database_url: &str) -> Result<Self, DbError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool = DeadPool::builder(manager)
            .max_size(PG_POOL_SIZE)
            .build()
            .map_err(to_diesel_error)?;
        Ok(Self { pool })
    }

    /// Check a connection out of the pool, waiting when it is exhausted.
    pub async fn get(&self) -> Result<PgConn, DbError> {
        self.pool.get().await.map_err(to_diesel_error)
    }
}

/// Runtime-selected database backend.
#[derive(Clone)]
pub enum DbPool {
    Sqlite(SqlitePool),
    #[cfg(feature = "postgres")]
    Postgres(PgPool),
}

impl DbPool {
    /// Create a pool from a database URL, selecting the backend by
    /// scheme: `postgres://`/`postgresql://` for PostgreSQL, anything
    /// else is treated as a SQLite path.
    pub fn from_url(url: &str) -> Result<Self, DbError> {
        if is_postgres_url(url) {
            #[cfg(feature = "postgres")]
            return Ok(DbPool::Postgres(PgPool::new(url)?));

            #[cfg(not(feature = "postgres"))]
            return Err(to_diesel_error(
                "PostgreSQL support is not compiled in, rebuild with --features postgres",
            ));
        }

        Ok(DbPool::Sqlite(SqlitePool::new(url)))
    }

    /// Create a SQLite pool from a file path.
    pub fn sqlite_from_path(path: &Path) -> Self {
        DbPool::Sqlite(SqlitePool::from_path(path))
    }

    pub fn is_sqlite(&self) -> bool {
        matches!(self, DbPool::Sqlite(_))
    }

    #[cfg(feature = "postgres")]
    pub fn is_postgres(&self) -> bool {
        matches!(self, DbPool::Postgres(_))
    }
}

/// Run one database operation on whichever backend the pool holds.
///
/// Binds a connection named `$conn` and evaluates `$body` against it;
/// the same Diesel DSL code compiles for both backends.
///
/// # Example
/// ```ignore
/// with_conn!(self.pool, conn => {
///     urls::table.load::<UrlRecord>(&mut conn).await
/// })
/// ```
#[macro_export]
macro_rules! with_conn {
    ($pool:expr, $conn:ident => $body:expr) => {{
        match &$pool {
            $crate::repository::pool::DbPool::Sqlite(pool) => {
                let mut $conn = pool.get().await?;
                $body
            }
            #[cfg(feature = "postgres")]
            $crate::repository::pool::DbPool::Postgres(pool) => {
                let mut $conn = pool.get().await?;
                $body
            }
        }
    }};
}

/// Like [`with_conn!`] but with one body per backend, for operations
/// whose SQL differs: `last_insert_rowid()` on SQLite versus
/// `RETURNING` on PostgreSQL.
///
/// # Example
/// ```ignore
/// with_conn_split!(self.pool,
///     sqlite: conn => {
///         diesel::insert_into(urls::table).values(&row).execute(&mut conn).await
///     },
///     postgres: conn => {
///         diesel::insert_into(urls::table)
///             .values(&row)
///             .returning(urls::id)
///             .get_result(&mut conn)
///             .await
///     }
/// )
/// ```
#[macro_export]
macro_rules! with_conn_split {
    ($pool:expr, sqlite: $sqlite_conn:ident => $sqlite_body:expr, postgres: $pg_conn:ident => $pg_body:expr) => {{
        match &$pool {
            $crate::repository::pool::DbPool::Sqlite(pool) => {
                let mut $sqlite_conn = pool.get().await?;
                $sqlite_body
            }
            #[cfg(feature = "postgres")]
            $crate::repository::pool::DbPool::Postgres(pool) => {
                let mut $pg_conn = pool.get().await?;
                $pg_body
            }
        }
    }};
}
