//! Tracked URL models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A URL tracked by the service, stored in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    /// Database row ID.
    pub id: i32,
    /// Canonical `https://host` form, unique across the table.
    pub name: String,
    /// When the URL was first added.
    pub created_at: DateTime<Utc>,
}

/// Listing row pairing a URL with a summary of its most recent check.
///
/// URLs that have never been checked carry `None` in both check fields.
#[derive(Debug, Clone, Serialize)]
pub struct UrlListRow {
    /// Database row ID.
    pub id: i32,
    /// Canonical `https://host` form.
    pub name: String,
    /// When the URL was first added.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent check, if any.
    pub last_check_at: Option<DateTime<Utc>>,
    /// HTTP status recorded by the most recent check, if any.
    pub last_status_code: Option<i32>,
}
