// src/watcher.rs

//! The scheduler loop: fetch → detect → decide → notify → sleep, strictly
//! sequential, one fetch in flight. Every failure inside a cycle is
//! downgraded to a log line; only a process interrupt stops the loop.

use tokio::time;

use crate::config::WatchConfig;
use crate::detect::detect;
use crate::edge::{Edge, EdgeTrigger};
use crate::fetch::PageFetcher;
use crate::notify::{Notifier, RainAlert};

const RAIN_STARTED_MSG: &str = "A new rain event just started! 🌦️";

pub struct Watcher {
    fetcher: Box<dyn PageFetcher>,
    notifier: Box<dyn Notifier>,
    cfg: WatchConfig,
    gate: EdgeTrigger,
}

impl Watcher {
    pub fn new(cfg: WatchConfig, fetcher: Box<dyn PageFetcher>, notifier: Box<dyn Notifier>) -> Self {
        Self {
            fetcher,
            notifier,
            cfg,
            gate: EdgeTrigger::new(),
        }
    }

    /// One poll cycle. Public so tests can drive the pipeline without the
    /// interval timer.
    pub async fn poll_once(&mut self) {
        let snapshot = match self
            .fetcher
            .fetch(&self.cfg.check_url, self.cfg.fetch_timeout)
            .await
        {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // No new information: the alert gate keeps its state, so a
                // blip mid-event neither duplicates nor suppresses alerts.
                tracing::warn!(fetcher = self.fetcher.name(), error = %e, "fetch failed, skipping cycle");
                return;
            }
        };

        let live = match detect(&snapshot, &self.cfg.triggers) {
            Ok(live) => live,
            Err(e) => {
                tracing::warn!(error = %e, "detector failed, treating page as not live");
                false
            }
        };

        match self.gate.observe(live) {
            Edge::Started => {
                tracing::info!("rain detected, sending notification");
                let alert = RainAlert {
                    message: RAIN_STARTED_MSG.to_string(),
                    page_url: self.cfg.check_url.clone(),
                    ts: snapshot.fetched_at,
                };
                if let Err(e) = self.notifier.send(&alert).await {
                    tracing::warn!(error = %e, "notification failed");
                }
            }
            Edge::Ended => tracing::info!("rain ended, alert re-armed"),
            Edge::Unchanged => tracing::debug!(live, "no state change"),
        }
    }

    /// Polls forever on the fixed interval; the first cycle runs
    /// immediately. Termination is the caller's job (process interrupt).
    pub async fn run(mut self) {
        tracing::info!(
            url = %self.cfg.check_url,
            interval_secs = self.cfg.poll_interval.as_secs(),
            fetcher = self.fetcher.name(),
            "watcher started"
        );
        let mut ticker = time::interval(self.cfg.poll_interval);
        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }
}
