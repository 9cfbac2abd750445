//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking.
//! Supports both SQLite and PostgreSQL backends.

pub mod checks;
pub mod context;
pub mod pool;
pub mod records;
pub mod urls;
pub mod util;

pub use checks::CheckRepository;
pub use context::{DbContext, DB_CONNECT_ATTEMPTS, DB_CONNECT_RETRY_DELAY};
pub use pool::{DbError, DbPool};
pub use urls::UrlRepository;

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Parse an optional datetime string from the database.
pub fn parse_datetime_opt(s: Option<String>) -> Option<DateTime<Utc>> {
    s.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}
