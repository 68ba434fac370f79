// src/fetch/http.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{FetchError, PageFetcher, PageSnapshot, USER_AGENT};

/// Plain GET strategy. Cheap, but only sees server-rendered markup.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<PageSnapshot, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("GET {url}: {e}")))?
            .error_for_status()
            .map_err(|e| FetchError::Transport(format!("GET {url}: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("read body of {url}: {e}")))?;

        tracing::debug!(url, bytes = body.len(), "page fetched");
        Ok(PageSnapshot::new(body, false))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
