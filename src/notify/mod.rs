// src/notify/mod.rs
pub mod discord;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// No webhook endpoint is configured. Callers log and carry on; this
    /// must never take the watch loop down.
    #[error("no webhook url configured")]
    Unconfigured,
    #[error("webhook transport error: {0}")]
    Transport(String),
}

/// Who the alert pings. `Everyone` and `Role` are mutually exclusive by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MentionMode {
    #[default]
    None,
    Everyone,
    Role(String),
}

#[derive(Debug, Clone)]
pub struct RainAlert {
    pub message: String,
    /// The watched page, linked from the alert so readers can jump in.
    pub page_url: String,
    pub ts: DateTime<Utc>,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, alert: &RainAlert) -> Result<(), NotifyError>;
}
