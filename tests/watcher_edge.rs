// tests/watcher_edge.rs
//
// Drives the scheduler pipeline poll-by-poll with a scripted fetcher and a
// recording notifier: edge-trigger, idempotence, resume-after-failure and
// reset behavior, end to end through Watcher::poll_once.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use rainbot::config::WatchConfig;
use rainbot::watcher::Watcher;
use rainbot::{FetchError, Notifier, NotifyError, PageFetcher, PageSnapshot, RainAlert};

const LIVE: &str = "<html><body><h1>JOIN RAIN EVENT</h1></body></html>";
const QUIET: &str = "<html><body>nothing to see here</body></html>";

/// One scripted poll outcome.
enum Step {
    Page(&'static str),
    Outage,
}

struct ScriptedFetcher {
    steps: Mutex<VecDeque<Step>>,
}

impl ScriptedFetcher {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
        }
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, _url: &str, _timeout: Duration) -> Result<PageSnapshot, FetchError> {
        match self.steps.lock().unwrap().pop_front() {
            Some(Step::Page(html)) => Ok(PageSnapshot::new(html, false)),
            Some(Step::Outage) => Err(FetchError::Transport("scripted outage".to_string())),
            None => Ok(PageSnapshot::new(QUIET, false)),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, alert: &RainAlert) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(alert.message.clone());
        Ok(())
    }
}

/// Notifier that always fails; used to prove failures never escape the loop.
struct BrokenNotifier;

#[async_trait]
impl Notifier for BrokenNotifier {
    async fn send(&self, _alert: &RainAlert) -> Result<(), NotifyError> {
        Err(NotifyError::Unconfigured)
    }
}

fn watcher_with(steps: Vec<Step>) -> (Watcher, RecordingNotifier) {
    let notifier = RecordingNotifier::default();
    let watcher = Watcher::new(
        WatchConfig::default(),
        Box::new(ScriptedFetcher::new(steps)),
        Box::new(notifier.clone()),
    );
    (watcher, notifier)
}

#[tokio::test]
async fn one_alert_per_contiguous_live_run() {
    let (mut watcher, notifier) = watcher_with(vec![
        Step::Page(QUIET),
        Step::Page(LIVE),
        Step::Page(LIVE),
        Step::Page(LIVE),
        Step::Page(QUIET),
    ]);

    watcher.poll_once().await;
    assert_eq!(notifier.count(), 0);

    watcher.poll_once().await;
    assert_eq!(notifier.count(), 1, "alert fires on the first live poll");

    watcher.poll_once().await;
    watcher.poll_once().await;
    assert_eq!(notifier.count(), 1, "repeat live polls stay silent");

    watcher.poll_once().await;
    assert_eq!(notifier.count(), 1, "the end of the event is silent");
}

#[tokio::test]
async fn fetch_failure_mid_run_neither_duplicates_nor_suppresses() {
    let (mut watcher, notifier) = watcher_with(vec![
        Step::Page(LIVE),
        Step::Outage,
        Step::Page(LIVE),
    ]);

    watcher.poll_once().await;
    assert_eq!(notifier.count(), 1);

    // The outage carries no new information; the gate must hold.
    watcher.poll_once().await;
    watcher.poll_once().await;
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn quiet_poll_rearms_for_the_next_event() {
    let (mut watcher, notifier) = watcher_with(vec![
        Step::Page(LIVE),
        Step::Page(QUIET),
        Step::Page(LIVE),
    ]);

    watcher.poll_once().await;
    watcher.poll_once().await;
    watcher.poll_once().await;
    assert_eq!(notifier.count(), 2, "two events, two alerts");
}

#[tokio::test]
async fn outage_before_any_event_stays_silent() {
    let (mut watcher, notifier) = watcher_with(vec![Step::Outage, Step::Page(QUIET)]);

    watcher.poll_once().await;
    watcher.poll_once().await;
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn notifier_failure_never_escapes_the_loop() {
    let mut watcher = Watcher::new(
        WatchConfig::default(),
        Box::new(ScriptedFetcher::new(vec![
            Step::Page(LIVE),
            Step::Page(QUIET),
            Step::Page(LIVE),
        ])),
        Box::new(BrokenNotifier),
    );

    // Three cycles with a permanently failing webhook: the loop keeps
    // advancing state and never panics or bails.
    watcher.poll_once().await;
    watcher.poll_once().await;
    watcher.poll_once().await;
}
