//! Web server for submitting URLs and browsing check history.
//!
//! Serves the HTML interface (submission form, URL listing, detail page
//! with check history) plus a small JSON API mirroring the same data.

mod assets;
mod flash;
mod handlers;
mod routes;
mod templates;

pub use flash::{Flash, FlashCategory};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::checker::PageChecker;
use crate::config::Settings;
use crate::repository::{CheckRepository, DbContext, UrlRepository};

/// Handler state: repositories and the page checker, shared by clone.
#[derive(Clone)]
pub struct AppState {
    pub url_repo: Arc<UrlRepository>,
    pub check_repo: Arc<CheckRepository>,
    pub checker: Arc<PageChecker>,
}

impl AppState {
    /// Build state from settings, opening the configured database.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let ctx = settings.create_db_context()?;
        Ok(Self::from_context(&ctx, settings))
    }

    /// Build state around an existing database context.
    pub fn from_context(ctx: &DbContext, settings: &Settings) -> Self {
        Self {
            url_repo: Arc::new(ctx.urls()),
            check_repo: Arc::new(ctx.checks()),
            checker: Arc::new(PageChecker::new(settings.fetch_timeout())),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
