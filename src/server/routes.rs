//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Submission form
        .route("/", get(handlers::index))
        // Tracked URLs
        .route("/urls", get(handlers::list_urls).post(handlers::create_url))
        .route("/urls/:id", get(handlers::url_detail))
        .route("/urls/:id/checks", post(handlers::create_check))
        // JSON API
        .route("/api/urls", get(handlers::api_urls))
        .route("/api/urls/:id", get(handlers::api_url_detail))
        // Static assets
        .route("/static/style.css", get(handlers::serve_css))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
