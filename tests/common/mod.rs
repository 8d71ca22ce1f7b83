//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

use portal_state::config::Config;
use portal_state::fetch::{FetchError, FetchRequest, Fetcher};
use portal_state::store::{
    AnalyticsError, AnalyticsEvent, AnalyticsSink, DispatchResult, Dispatchable, Middleware,
    Next, Store, StoreState,
};
use portal_state::Portal;

pub type Reply = Result<Value, FetchError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// In-memory [`Fetcher`] answering from per-path queues.
///
/// Replies are consumed in order. A gated reply holds the request open
/// until the test sends through the returned `oneshot::Sender`, which lets
/// tests choose the order in which concurrent requests complete.
#[derive(Default)]
pub struct ScriptedFetcher {
    replies: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, path: &str, reply: Reply) {
        self.replies
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(Scripted::Ready(reply));
    }

    pub fn ok(&self, path: &str, body: Value) {
        self.reply(path, Ok(body));
    }

    pub fn fail(&self, path: &str, err: FetchError) {
        self.reply(path, Err(err));
    }

    /// Queue a reply that is only delivered once the sender is used.
    pub fn gate(&self, path: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(Scripted::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().clone()
    }

    /// Wait until `count` requests to `path` have been issued.
    pub async fn wait_for_requests(&self, path: &str, count: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.requests_to(path).len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("requests issued in time");
    }

    pub fn requests_to(&self, path: &str) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.url.path() == path)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<Value, FetchError> {
        let path = request.url.path().to_string();
        let scripted = self
            .replies
            .lock()
            .get_mut(&path)
            .and_then(VecDeque::pop_front);
        // Recorded after claiming the reply, so a visible request owns its gate.
        self.requests.lock().push(request);

        match scripted {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx.await.unwrap_or_else(|_| Err(transport_error(&path))),
            None => Err(FetchError::Status { status: 404 }),
        }
    }
}

pub fn transport_error(path: &str) -> FetchError {
    FetchError::Transport {
        url: path.to_string(),
        message: "connection reset".to_string(),
    }
}

/// Sink that keeps every event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|event| event.kind).collect()
    }
}

impl AnalyticsSink for RecordingSink {
    fn track(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        self.events.lock().push(event);
        Ok(())
    }
}

/// Middleware recording the kind of every plain action it forwards.
#[derive(Default)]
pub struct RecordingMiddleware {
    seen: Mutex<Vec<&'static str>>,
}

impl RecordingMiddleware {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seen(&self) -> Vec<&'static str> {
        self.seen.lock().clone()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.seen.lock().iter().filter(|seen| **seen == kind).count()
    }
}

impl Middleware for RecordingMiddleware {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn handle(&self, _store: &Store, dispatchable: Dispatchable, next: Next<'_>) -> DispatchResult {
        self.seen.lock().push(dispatchable.label());
        next.run(dispatchable)
    }
}

/// Config pointing at a fake host; paths are the defaults.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.api.base_url = "http://portal.test".to_string();
    config
}

pub fn activity_path() -> String {
    test_config().api.activity_path
}

pub fn csrf_path() -> String {
    test_config().api.csrf_path
}

/// Portal over a scripted fetcher, recording telemetry.
pub fn scripted_portal() -> (Portal, Arc<ScriptedFetcher>, Arc<RecordingSink>) {
    let fetcher = ScriptedFetcher::new();
    let sink = RecordingSink::new();
    let portal = Portal::new(&test_config(), fetcher.clone(), sink.clone())
        .expect("portal assembles");
    (portal, fetcher, sink)
}

/// Wait until `predicate` holds for the published state.
pub async fn wait_for_state<F>(store: &Store, predicate: F) -> StoreState
where
    F: FnMut(&StoreState) -> bool,
{
    let mut rx = store.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(predicate))
        .await
        .expect("state condition reached in time")
        .expect("store alive");
    state.clone()
}

/// Activity payload in the server's wire format.
pub fn activity_page(ids: &[&str], bookmark: Option<&str>, more: bool) -> Value {
    let cases: Vec<Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Case {id}"),
                "status": "open",
            })
        })
        .collect();
    serde_json::json!({
        "cases": cases,
        "bookmark": bookmark,
        "moreRecords": more,
    })
}
