// src/notify/discord.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{MentionMode, Notifier, NotifyError, RainAlert};

const BOT_NAME: &str = "RainBot";
const EMBED_COLOR: u32 = 0x3498db;

#[derive(Clone)]
pub struct DiscordNotifier {
    webhook: Option<String>,
    mention: MentionMode,
    client: Client,
    timeout: Duration,
}

impl DiscordNotifier {
    pub fn new(webhook: Option<String>, mention: MentionMode) -> Self {
        Self {
            webhook,
            mention,
            client: Client::new(),
            timeout: Duration::from_secs(12),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.webhook.is_some()
    }

    fn build_payload(&self, alert: &RainAlert) -> WebhookPayload {
        let (content, allowed_mentions) = match &self.mention {
            MentionMode::None => (String::new(), AllowedMentions::default()),
            MentionMode::Everyone => (
                "@everyone".to_string(),
                AllowedMentions {
                    parse: vec!["everyone".to_string()],
                    roles: None,
                },
            ),
            MentionMode::Role(id) => (
                format!("<@&{id}>"),
                AllowedMentions {
                    parse: Vec::new(),
                    roles: Some(vec![id.clone()]),
                },
            ),
        };

        WebhookPayload {
            username: BOT_NAME.to_string(),
            content,
            allowed_mentions,
            embeds: vec![Embed {
                title: "🌧️ Rain event is live!".to_string(),
                description: format!("{}\n**Check it out:** {}", alert.message, alert.page_url),
                url: alert.page_url.clone(),
                color: EMBED_COLOR,
                footer: EmbedFooter {
                    text: "RainBot – Live Alert".to_string(),
                },
                timestamp: alert.ts.to_rfc3339(),
            }],
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, alert: &RainAlert) -> Result<(), NotifyError> {
        let Some(url) = &self.webhook else {
            return Err(NotifyError::Unconfigured);
        };

        let payload = self.build_payload(alert);
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(format!("webhook request failed: {e}")))?;

        response
            .error_for_status()
            .map_err(|e| NotifyError::Transport(format!("webhook HTTP error: {e}")))?;

        tracing::debug!("discord alert delivered");
        Ok(())
    }
}

#[derive(Debug, Serialize, Default)]
struct AllowedMentions {
    parse: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct EmbedFooter {
    text: String,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    url: String,
    color: u32,
    footer: EmbedFooter,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct WebhookPayload {
    username: String,
    content: String,
    allowed_mentions: AllowedMentions,
    embeds: Vec<Embed>,
}
