// src/fetch/browser.rs
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use headless_chrome::{Browser, Tab};

use super::{FetchError, PageFetcher, PageSnapshot, USER_AGENT};

/// Cookie-consent buttons we try to click after navigation. Each attempt
/// is best-effort: a missing button or a failed click is ignored and the
/// check proceeds with whatever is on the page.
const CONSENT_LABELS: [&str; 5] = ["Accept All", "I Agree", "Accept", "Allow Cookies", "OK"];

/// Rendered strategy: drives one headless Chromium held open for the
/// process lifetime. Dropping the fetcher tears the engine down, so an
/// interrupt never leaves a browser process behind.
pub struct BrowserFetcher {
    browser: Browser,
}

impl BrowserFetcher {
    /// Launches the engine. The chromium binary must be present; this is
    /// the one place the browser strategy can fail at startup.
    pub fn launch() -> anyhow::Result<Self> {
        let browser = Browser::default().context("launch headless chromium")?;
        Ok(Self { browser })
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<PageSnapshot, FetchError> {
        let browser = self.browser.clone();
        let target = url.to_string();
        let task = tokio::task::spawn_blocking(move || render_page(&browser, &target, timeout));

        // The tab's own default timeout bounds the blocking work; the outer
        // timeout only caps how long we wait for it.
        match tokio::time::timeout(timeout + Duration::from_secs(5), task).await {
            Ok(Ok(result)) => {
                let html = result?;
                tracing::debug!(url, bytes = html.len(), "page rendered");
                Ok(PageSnapshot::new(html, true))
            }
            Ok(Err(join_err)) => Err(FetchError::Render(format!(
                "render task for {url} died: {join_err}"
            ))),
            Err(_) => Err(FetchError::Render(format!(
                "navigation to {url} timed out after {}s",
                timeout.as_secs()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}

fn render_page(browser: &Browser, url: &str, timeout: Duration) -> Result<String, FetchError> {
    let tab = browser
        .new_tab()
        .map_err(|e| render_err(url, &e))?;
    tab.set_default_timeout(timeout);
    tab.set_user_agent(USER_AGENT, None, None)
        .map_err(|e| render_err(url, &e))?;

    tab.navigate_to(url).map_err(|e| render_err(url, &e))?;
    tab.wait_until_navigated().map_err(|e| render_err(url, &e))?;

    dismiss_consent_overlays(&tab);

    let html = tab.get_content().map_err(|e| render_err(url, &e))?;
    let _ = tab.close(true);
    Ok(html)
}

/// Clicks through known consent banners so the event markup is reachable.
/// Failures are swallowed on purpose; the page is checked regardless.
fn dismiss_consent_overlays(tab: &Tab) {
    for label in CONSENT_LABELS {
        let xpath = format!("//button[contains(., '{label}')]");
        if let Ok(button) = tab.find_element_by_xpath(&xpath) {
            if button.click().is_ok() {
                tracing::debug!(label, "dismissed consent overlay");
            }
        }
    }
}

fn render_err(url: &str, e: &anyhow::Error) -> FetchError {
    FetchError::Render(format!("{url}: {e}"))
}
