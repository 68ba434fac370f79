//! Sends one demo rain alert through the configured webhook (prints the
//! config error when WEBHOOK_URL is unset).

use chrono::Utc;
use rainbot::notify::discord::DiscordNotifier;
use rainbot::{MentionMode, Notifier, RainAlert};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();
    let _ = dotenvy::dotenv();

    let webhook = std::env::var("WEBHOOK_URL").ok();
    let notifier = DiscordNotifier::new(webhook, MentionMode::None);

    let alert = RainAlert {
        message: "Demo alert from notify_demo.".to_string(),
        page_url: "https://example.com".to_string(),
        ts: Utc::now(),
    };

    match notifier.send(&alert).await {
        Ok(()) => println!("notify-demo: alert delivered"),
        Err(e) => println!("notify-demo: {e}"),
    }
}
