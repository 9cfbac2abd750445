//! Render structs for the HTML templates.
//!
//! One struct per file under templates/, checked against its template
//! at compile time by askama. Row helpers pre-format timestamps and
//! optional fields so the templates stay logic-free.

use askama::Template;

use super::flash::Flash;
use crate::models::{UrlCheck, UrlListRow};

/// Flash message prepared for rendering.
pub struct FlashView {
    pub category: String,
    pub message: String,
}

impl From<Flash> for FlashView {
    fn from(flash: Flash) -> Self {
        Self {
            category: flash.category.as_str().to_string(),
            message: flash.message,
        }
    }
}

/// One row of the URL listing, formatted for display.
pub struct UrlRow {
    pub id: i32,
    pub name: String,
    pub last_check_str: String,
    pub last_status_str: String,
}

impl From<UrlListRow> for UrlRow {
    fn from(row: UrlListRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            last_check_str: row
                .last_check_at
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            last_status_str: row
                .last_status_code
                .map(|code| code.to_string())
                .unwrap_or_default(),
        }
    }
}

/// One row of the check history table, formatted for display.
pub struct CheckRow {
    pub id: i32,
    pub status_str: String,
    pub h1: String,
    pub title: String,
    pub description: String,
    pub created_str: String,
}

impl From<UrlCheck> for CheckRow {
    fn from(check: UrlCheck) -> Self {
        Self {
            id: check.id,
            status_str: check
                .status_code
                .map(|code| code.to_string())
                .unwrap_or_default(),
            h1: check.h1,
            title: check.title,
            description: check.description,
            created_str: check.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Landing page with the URL submission form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub flash: Option<FlashView>,
    pub value: &'a str,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

/// Tracked URLs listing page.
#[derive(Template)]
#[template(path = "urls.html")]
pub struct UrlListTemplate<'a> {
    pub title: &'a str,
    pub flash: Option<FlashView>,
    pub urls: Vec<UrlRow>,
    pub has_urls: bool,
}

/// URL detail page with check history.
#[derive(Template)]
#[template(path = "url_detail.html")]
pub struct UrlDetailTemplate<'a> {
    pub title: &'a str,
    pub flash: Option<FlashView>,
    pub url_id: i32,
    pub url_name: &'a str,
    pub url_created_str: String,
    pub checks: Vec<CheckRow>,
    pub has_checks: bool,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub flash: Option<FlashView>,
    pub message: &'a str,
}
