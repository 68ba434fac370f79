// src/detect.rs

//! Classifies fetched page content as event-live or not.
//!
//! Two tiers: structural selector presence on a rendered DOM first (more
//! precise, skips navigation/footer noise), then a case-insensitive
//! substring scan as the universal fallback. Pure existential match, no
//! negative triggers, no scoring.

use scraper::{Html, Selector};
use thiserror::Error;

use crate::fetch::PageSnapshot;

/// Trigger phrases the original deployment watches for.
pub const DEFAULT_RAIN_TEXTS: [&str; 2] = ["join rain event", "rakeback rain"];

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("unexpected detector failure: {0}")]
    Unexpected(String),
}

/// Immutable trigger configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct TriggerSet {
    texts: Vec<String>,
    selectors: Vec<String>,
}

impl TriggerSet {
    /// Texts are lowercased up front so each poll lowercases only the
    /// content. Empty entries are dropped; selector order is kept, it is
    /// the priority order.
    pub fn new(texts: Vec<String>, selectors: Vec<String>) -> Self {
        let texts = texts
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let selectors = selectors
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { texts, selectors }
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }
}

impl Default for TriggerSet {
    fn default() -> Self {
        Self::new(
            DEFAULT_RAIN_TEXTS.iter().map(|t| t.to_string()).collect(),
            Vec::new(),
        )
    }
}

/// Returns whether the snapshot shows the event as live.
///
/// Selector checks only run against rendered snapshots; a plain GET body
/// has no reliable DOM, so it goes straight to the substring tier. The
/// first selector with a present element short-circuits.
pub fn detect(snapshot: &PageSnapshot, triggers: &TriggerSet) -> Result<bool, DetectError> {
    if snapshot.rendered && !triggers.selectors.is_empty() {
        let dom = Html::parse_document(&snapshot.text);
        for raw in &triggers.selectors {
            let selector = Selector::parse(raw)
                .map_err(|e| DetectError::Unexpected(format!("bad selector {raw:?}: {e}")))?;
            if dom.select(&selector).next().is_some() {
                return Ok(true);
            }
        }
    }

    let haystack = snapshot.text.to_lowercase();
    Ok(triggers.texts.iter().any(|t| haystack.contains(t.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(text: &str, rendered: bool) -> PageSnapshot {
        PageSnapshot::new(text, rendered)
    }

    fn texts_only(texts: &[&str]) -> TriggerSet {
        TriggerSet::new(texts.iter().map(|t| t.to_string()).collect(), Vec::new())
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let triggers = texts_only(&["join rain event"]);
        let page = snap("<h1>JOIN RAIN EVENT</h1>", false);
        assert!(detect(&page, &triggers).unwrap());
    }

    #[test]
    fn any_single_trigger_suffices() {
        let triggers = TriggerSet::default();
        let page = snap("claim your Rakeback Rain bonus now", false);
        assert!(detect(&page, &triggers).unwrap());
    }

    #[test]
    fn quiet_page_does_not_match() {
        let triggers = TriggerSet::default();
        let page = snap("<html><body>no promotions today</body></html>", false);
        assert!(!detect(&page, &triggers).unwrap());
    }

    #[test]
    fn empty_trigger_set_never_matches() {
        let triggers = TriggerSet::new(Vec::new(), Vec::new());
        let page = snap("join rain event", false);
        assert!(!detect(&page, &triggers).unwrap());
    }

    #[test]
    fn selector_presence_short_circuits_on_rendered_dom() {
        let triggers = TriggerSet::new(Vec::new(), vec!["button.rain-join".into()]);
        let page = snap(
            r#"<html><body><button class="rain-join">go</button></body></html>"#,
            true,
        );
        assert!(detect(&page, &triggers).unwrap());
    }

    #[test]
    fn selectors_are_ignored_for_plain_http_snapshots() {
        let triggers = TriggerSet::new(Vec::new(), vec!["button.rain-join".into()]);
        let page = snap(
            r#"<html><body><button class="rain-join">go</button></body></html>"#,
            false,
        );
        assert!(!detect(&page, &triggers).unwrap());
    }

    #[test]
    fn selector_miss_falls_back_to_substring_scan() {
        let triggers = TriggerSet::new(
            vec!["rakeback rain".into()],
            vec!["button.absent".into()],
        );
        let page = snap("<html><body>Rakeback Rain is on!</body></html>", true);
        assert!(detect(&page, &triggers).unwrap());
    }

    #[test]
    fn invalid_selector_is_an_unexpected_error() {
        let triggers = TriggerSet::new(Vec::new(), vec!["[[[".into()]);
        let page = snap("<html></html>", true);
        let err = detect(&page, &triggers).unwrap_err();
        assert!(matches!(err, DetectError::Unexpected(_)));
    }

    #[test]
    fn trigger_texts_are_normalized_at_construction() {
        let set = TriggerSet::new(vec!["  JOIN Rain EVENT ".into(), "".into()], Vec::new());
        assert_eq!(set.texts(), ["join rain event"]);
    }
}
