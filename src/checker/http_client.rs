//! HTTP client used for page checks.

use std::time::Duration;

use reqwest::{Client, StatusCode};

/// User agent sent with every check request.
pub const USER_AGENT: &str = "pagecheck/0.1";

/// Thin wrapper around [`reqwest::Client`] configured for page checks.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// GET `url` and return the final status together with the body text.
    pub async fn fetch(&self, url: &str) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}
