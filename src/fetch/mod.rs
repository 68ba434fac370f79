// src/fetch/mod.rs
pub mod browser;
pub mod http;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// User-agent sent by both strategies, matching a current desktop Chrome.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/122.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    /// Network error or non-success status from the plain GET.
    #[error("transport error: {0}")]
    Transport(String),
    /// Navigation timeout or unrecoverable browser-engine failure.
    #[error("render error: {0}")]
    Render(String),
}

/// One poll's view of the page. Not retained beyond the cycle that
/// produced it.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub text: String,
    /// True when `text` is a serialized DOM from the browser strategy,
    /// which makes it eligible for structural selector checks.
    pub rendered: bool,
    pub fetched_at: DateTime<Utc>,
}

impl PageSnapshot {
    pub fn new(text: impl Into<String>, rendered: bool) -> Self {
        Self {
            text: text.into(),
            rendered,
            fetched_at: Utc::now(),
        }
    }
}

/// A way of turning a URL into page text. The strategy is picked once at
/// startup; the watcher only ever sees this trait.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<PageSnapshot, FetchError>;

    fn name(&self) -> &'static str;
}
