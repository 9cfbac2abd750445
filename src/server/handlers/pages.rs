//! HTML page handlers for the web interface.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use super::super::flash::{self, Flash};
use super::super::templates::{
    CheckRow, ErrorTemplate, FlashView, IndexTemplate, UrlDetailTemplate, UrlListTemplate, UrlRow,
};
use super::super::AppState;
use crate::urls;

/// Form body of a URL submission.
#[derive(Debug, Deserialize)]
pub struct UrlForm {
    pub url: String,
}

/// Render a page, clearing the flash cookie when one was consumed.
fn page_response(markup: Result<String, askama::Error>, consumed_flash: bool) -> Response {
    let body = Html(markup.unwrap_or_else(|e| e.to_string()));
    if consumed_flash {
        ([(header::SET_COOKIE, flash::clear_cookie())], body).into_response()
    } else {
        body.into_response()
    }
}

/// Redirect after a form submission, carrying a flash for the next page.
fn redirect_with_flash(location: &str, message: &Flash) -> Response {
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, location.to_string()),
            (header::SET_COOKIE, flash::set_cookie(message)),
        ],
    )
        .into_response()
}

fn error_page(status: StatusCode, title: &str, message: &str) -> Response {
    let template = ErrorTemplate {
        title,
        flash: None,
        message,
    };
    (
        status,
        Html(template.render().unwrap_or_else(|_| message.to_string())),
    )
        .into_response()
}

/// Landing page with the URL submission form.
pub async fn index(headers: HeaderMap) -> Response {
    let message = flash::from_headers(&headers);
    let consumed = message.is_some();

    let template = IndexTemplate {
        title: "Page Check",
        flash: message.map(FlashView::from),
        value: "",
        errors: Vec::new(),
        has_errors: false,
    };
    page_response(template.render(), consumed)
}

/// Accept a URL submission: normalize, validate, store, and redirect to
/// the URL's page.
///
/// Invalid submissions re-render the form with every violated rule and
/// a 422 status. A URL that is already tracked redirects to the
/// existing entry instead of failing.
pub async fn create_url(State(state): State<AppState>, Form(form): Form<UrlForm>) -> Response {
    let raw = form.url.trim();
    let normalized = urls::normalize(raw);

    // The emptiness rule applies to what the user typed; the rest apply
    // to the canonical form that would be stored.
    let issues = if raw.is_empty() {
        vec![urls::ValidationIssue::Required]
    } else {
        urls::validate(&normalized)
    };

    if !issues.is_empty() {
        let template = IndexTemplate {
            title: "Page Check",
            flash: None,
            value: raw,
            errors: issues
                .iter()
                .map(|issue| issue.message().to_string())
                .collect(),
            has_errors: true,
        };
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(template.render().unwrap_or_default()),
        )
            .into_response();
    }

    match state.url_repo.insert_or_get(&normalized).await {
        Ok((id, true)) => redirect_with_flash(
            &format!("/urls/{}", id),
            &Flash::success("Page added successfully"),
        ),
        Ok((id, false)) => redirect_with_flash(
            &format!("/urls/{}", id),
            &Flash::info("Page already exists"),
        ),
        Err(e) => error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error",
            &format!("Failed to save URL: {}", e),
        ),
    }
}

/// Listing of every tracked URL with its latest check.
pub async fn list_urls(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let message = flash::from_headers(&headers);
    let consumed = message.is_some();

    let rows = match state.url_repo.list_all().await {
        Ok(rows) => rows,
        Err(e) => {
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error",
                &format!("Failed to load URLs: {}", e),
            )
        }
    };

    let urls: Vec<UrlRow> = rows.into_iter().map(UrlRow::from).collect();
    let template = UrlListTemplate {
        title: "Tracked URLs",
        flash: message.map(FlashView::from),
        has_urls: !urls.is_empty(),
        urls,
    };
    page_response(template.render(), consumed)
}

/// Detail page for one URL with its full check history.
pub async fn url_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    let message = flash::from_headers(&headers);
    let consumed = message.is_some();

    let url = match state.url_repo.get_by_id(id).await {
        Ok(Some(url)) => url,
        Ok(None) => {
            return error_page(
                StatusCode::NOT_FOUND,
                "Not found",
                &format!("No URL with id {}", id),
            )
        }
        Err(e) => {
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error",
                &format!("Failed to load URL: {}", e),
            )
        }
    };

    let checks = match state.check_repo.list_for_url(id).await {
        Ok(checks) => checks,
        Err(e) => {
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error",
                &format!("Failed to load checks: {}", e),
            )
        }
    };

    let checks: Vec<CheckRow> = checks.into_iter().map(CheckRow::from).collect();
    let template = UrlDetailTemplate {
        title: &url.name,
        flash: message.map(FlashView::from),
        url_id: url.id,
        url_name: &url.name,
        url_created_str: url.created_at.format("%Y-%m-%d %H:%M").to_string(),
        has_checks: !checks.is_empty(),
        checks,
    };
    page_response(template.render(), consumed)
}

/// Fetch a tracked URL now and record the outcome as a new check.
///
/// A failed fetch records nothing; the user sees the reason as a flash
/// message on the detail page instead.
pub async fn create_check(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let url = match state.url_repo.get_by_id(id).await {
        Ok(Some(url)) => url,
        Ok(None) => {
            return error_page(
                StatusCode::NOT_FOUND,
                "Not found",
                &format!("No URL with id {}", id),
            )
        }
        Err(e) => {
            return error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error",
                &format!("Failed to load URL: {}", e),
            )
        }
    };

    let location = format!("/urls/{}", id);

    let info = match state.checker.check(&url.name).await {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!("check of {} failed: {}", url.name, e);
            return redirect_with_flash(
                &location,
                &Flash::error(format!("Failed to check page: {}", e)),
            );
        }
    };

    match state.check_repo.save(id, &info).await {
        Ok(_) => redirect_with_flash(&location, &Flash::success("Page checked successfully")),
        Err(e) => error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error",
            &format!("Failed to record check: {}", e),
        ),
    }
}
