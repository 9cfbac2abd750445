//! JSON API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::super::AppState;
use crate::models::{Url, UrlCheck};

/// URL detail payload with the full check history.
#[derive(Serialize)]
pub struct UrlDetailResponse {
    pub url: Url,
    pub checks: Vec<UrlCheck>,
}

/// Every tracked URL with its latest check summary.
pub async fn api_urls(State(state): State<AppState>) -> impl IntoResponse {
    match state.url_repo.list_all().await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// One tracked URL with its check history.
pub async fn api_url_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let url = match state.url_repo.get_by_id(id).await {
        Ok(Some(url)) => url,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": format!("no URL with id {}", id) })),
            )
                .into_response()
        }
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    };

    match state.check_repo.list_for_url(id).await {
        Ok(checks) => Json(UrlDetailResponse { url, checks }).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
