// src/config.rs

//! Environment-sourced configuration. Every key is optional and falls back
//! to the documented default, so a bare process still comes up and answers
//! health probes; missing pieces are surfaced as startup warnings instead.

use std::str::FromStr;
use std::time::Duration;

use crate::detect::{TriggerSet, DEFAULT_RAIN_TEXTS};
use crate::notify::MentionMode;

pub const DEFAULT_CHECK_URL: &str = "https://bandit.camp";
pub const DEFAULT_POLL_SECONDS: u64 = 20;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_HEALTH_PORT: u16 = 10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    Http,
    Browser,
}

/// Immutable for the process lifetime; constructed once in `main` and
/// passed by value into the watcher.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub check_url: String,
    pub poll_interval: Duration,
    pub fetch_timeout: Duration,
    pub webhook_url: Option<String>,
    pub strategy: FetchStrategy,
    pub mention: MentionMode,
    pub triggers: TriggerSet,
    pub health_port: u16,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            check_url: DEFAULT_CHECK_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECONDS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            webhook_url: None,
            strategy: FetchStrategy::Http,
            mention: MentionMode::None,
            triggers: TriggerSet::default(),
            health_port: DEFAULT_HEALTH_PORT,
        }
    }
}

impl WatchConfig {
    pub fn from_env() -> Self {
        let strategy = match std::env::var("FETCH_STRATEGY")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str()
        {
            "browser" | "render" => FetchStrategy::Browser,
            _ => FetchStrategy::Http,
        };

        // PING_EVERYONE wins over ROLE_ID; the two mention styles are
        // mutually exclusive on the Discord side.
        let mention = if env_flag("PING_EVERYONE") {
            MentionMode::Everyone
        } else {
            match env_nonempty("ROLE_ID") {
                Some(id) => MentionMode::Role(id),
                None => MentionMode::None,
            }
        };

        let texts = env_list("RAIN_TEXTS")
            .unwrap_or_else(|| DEFAULT_RAIN_TEXTS.iter().map(|t| t.to_string()).collect());
        let selectors = env_list("RAIN_SELECTORS").unwrap_or_default();

        Self {
            check_url: env_nonempty("CHECK_URL").unwrap_or_else(|| DEFAULT_CHECK_URL.to_string()),
            poll_interval: Duration::from_secs(env_parse("POLL_SECONDS", DEFAULT_POLL_SECONDS)),
            fetch_timeout: Duration::from_secs(env_parse(
                "FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )),
            webhook_url: env_nonempty("WEBHOOK_URL"),
            strategy,
            mention,
            triggers: TriggerSet::new(texts, selectors),
            health_port: env_parse("PORT", DEFAULT_HEALTH_PORT),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    matches!(
        std::env::var(key)
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "1" | "true" | "yes"
    )
}

/// Comma-separated list; `None` when the variable is unset so callers can
/// fall back to their own default.
fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|v| {
        v.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}
