//! Page checking: fetch a tracked URL and extract its SEO metadata.
//!
//! A check fetches the page body over HTTP and scrapes the status code,
//! `<title>`, first `<h1>`, and meta description out of it. Fetch
//! failures are reported to the caller; nothing is recorded for them.

mod extract;
mod http_client;

pub use extract::extract_page_info;
pub use http_client::HttpClient;

use std::time::Duration;

use thiserror::Error;

use crate::models::PageInfo;

/// Why a page check produced no result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed before a usable response arrived: connection
    /// refused, DNS failure, timeout, or a truncated body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server returned status {status} for {url}")]
    Status { status: u16, url: String },
}

/// Fetches pages and turns them into [`PageInfo`] records.
#[derive(Clone)]
pub struct PageChecker {
    client: HttpClient,
}

impl PageChecker {
    /// Create a checker whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: HttpClient::new(timeout),
        }
    }

    /// Fetch `url` and extract its metadata.
    ///
    /// Any non-2xx response is an error; redirects are followed before
    /// the status is judged.
    pub async fn check(&self, url: &str) -> Result<PageInfo, FetchError> {
        let (status, body) = self.client.fetch(url).await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(extract_page_info(status.as_u16(), &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Nothing listens on port 1, so connection is refused immediately.
        let checker = PageChecker::new(Duration::from_secs(2));
        let err = checker.check("https://127.0.0.1:1").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
