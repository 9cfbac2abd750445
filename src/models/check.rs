//! Page check models.
//!
//! A check is one fetch of a tracked URL: the HTTP status plus the SEO
//! metadata scraped from the response body. Checks accumulate over time
//! and are never updated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded check of a tracked URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlCheck {
    /// Database row ID.
    pub id: i32,
    /// The tracked URL this check belongs to.
    pub url_id: i32,
    /// HTTP status of the fetch. Absent for rows written before the
    /// status was recorded.
    pub status_code: Option<i32>,
    /// Text of the first `<h1>` element, empty when the page has none.
    pub h1: String,
    /// Text of the `<title>` element, empty when the page has none.
    pub title: String,
    /// Content of `<meta name="description">`, empty when absent.
    pub description: String,
    /// When the check ran.
    pub created_at: DateTime<Utc>,
}

/// Metadata extracted from one successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// HTTP status of the response.
    pub status_code: u16,
    /// Text of the first `<h1>` element, empty when missing.
    pub h1: String,
    /// Text of the `<title>` element, empty when missing.
    pub title: String,
    /// Content of `<meta name="description">`, empty when missing.
    pub description: String,
}
