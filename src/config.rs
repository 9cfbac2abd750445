//! Runtime configuration.
//!
//! Settings come from the environment (optionally via a `.env` file
//! loaded at startup) with working defaults for local use. `DATABASE_URL`
//! takes precedence over the default SQLite file.

use std::path::PathBuf;
use std::time::Duration;

use crate::repository::util::validate_database_url;
use crate::repository::DbContext;

/// SQLite file used when no `DATABASE_URL` is set.
pub const DEFAULT_DATABASE_FILE: &str = "pagecheck.sqlite";

/// Address the web server binds when none is given.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Page fetch timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Explicit database URL, overriding the default SQLite file.
    pub database_url: Option<String>,
    /// SQLite file used when no URL is configured.
    pub database_file: PathBuf,
    /// Seconds before an outstanding page fetch is abandoned.
    pub fetch_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            database_file: PathBuf::from(DEFAULT_DATABASE_FILE),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from the environment on top of the defaults.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        // DATABASE_URL takes precedence over the default SQLite file
        if let Some(url) = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()) {
            tracing::debug!("Using DATABASE_URL from environment");
            settings.database_url = Some(url);
        }

        if let Some(timeout) = std::env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            settings.fetch_timeout_secs = timeout;
        }

        settings
    }

    /// The effective database URL.
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!("sqlite:{}", self.database_file.display()),
        }
    }

    /// Page fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Create a database context using the configured database URL.
    ///
    /// Returns an error when the URL selects a backend this build does
    /// not support.
    pub fn create_db_context(&self) -> anyhow::Result<DbContext> {
        let url = self.database_url();
        validate_database_url(&url).map_err(|e| anyhow::anyhow!(e))?;
        Ok(DbContext::from_url(&url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_url_is_sqlite_file() {
        let settings = Settings::default();
        assert_eq!(settings.database_url(), "sqlite:pagecheck.sqlite");
    }

    #[test]
    fn test_explicit_url_takes_precedence() {
        let settings = Settings {
            database_url: Some("sqlite:/tmp/other.db".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.database_url(), "sqlite:/tmp/other.db");
    }

    #[test]
    fn test_fetch_timeout() {
        let settings = Settings::default();
        assert_eq!(settings.fetch_timeout(), Duration::from_secs(10));
    }
}
