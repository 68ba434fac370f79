//! RainBot — binary entrypoint.
//! Boots the liveness server and the polling watcher, then runs until
//! interrupted.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use rainbot::config::{FetchStrategy, WatchConfig};
use rainbot::fetch::{browser::BrowserFetcher, http::HttpFetcher, PageFetcher};
use rainbot::health;
use rainbot::notify::discord::DiscordNotifier;
use rainbot::watcher::Watcher;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rainbot=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = WatchConfig::from_env();
    tracing::info!(
        url = %cfg.check_url,
        strategy = ?cfg.strategy,
        version = env!("CARGO_PKG_VERSION"),
        "RainBot starting"
    );

    if cfg.webhook_url.is_none() {
        tracing::warn!("WEBHOOK_URL not set; rain alerts will be logged but not delivered");
    }

    // Health probes must stay answerable regardless of notifier or fetcher
    // configuration, so the port bind is the only unconditional fatal step.
    let listener = health::bind(cfg.health_port).await?;
    tracing::info!(port = cfg.health_port, "health server listening");
    tokio::spawn(async move {
        if let Err(e) = health::serve(listener).await {
            tracing::error!(error = %e, "health server stopped");
        }
    });

    let fetcher: Box<dyn PageFetcher> = match cfg.strategy {
        FetchStrategy::Http => Box::new(HttpFetcher::new()),
        FetchStrategy::Browser => Box::new(BrowserFetcher::launch()?),
    };
    let notifier = DiscordNotifier::new(cfg.webhook_url.clone(), cfg.mention.clone());

    let watcher = Watcher::new(cfg, fetcher, Box::new(notifier));

    // Dropping the watcher future on interrupt tears down the fetcher too,
    // which is what keeps a headless browser from being orphaned.
    tokio::select! {
        _ = watcher.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, shutting down");
        }
    }

    Ok(())
}
