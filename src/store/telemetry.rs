//! Telemetry interceptor and analytics sinks.
//!
//! For a configured set of action kinds the interceptor lets the action
//! reach the reducers first, then reports a fire-and-forget analytics event.
//! Reporting never fails the dispatch: sink errors and panics are swallowed.

use std::collections::{BTreeMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use reqwest::{Client, Url};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::middleware::{DispatchResult, Dispatchable, Dispatched, Middleware, Next};
use super::store::Store;
use crate::modules::location::LocationState;

/// Errors a sink may report. Logged at debug level and otherwise ignored.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("No async runtime available to deliver analytics event")]
    NoRuntime,

    #[error("Analytics sink rejected event: {0}")]
    Rejected(String),
}

/// A single analytics event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub kind: &'static str,
    /// Pathname of the current location, when the location slice exists.
    pub page: Option<String>,
    pub properties: BTreeMap<String, serde_json::Value>,
}

/// Destination for analytics events.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Emits analytics events as structured tracing events on target `analytics`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn track(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        tracing::info!(
            target: "analytics",
            id = %event.id,
            kind = event.kind,
            page = event.page.as_deref().unwrap_or(""),
            properties = ?event.properties,
            "Analytics event"
        );
        Ok(())
    }
}

/// Posts each event as JSON to a beacon endpoint on a detached task.
pub struct BeaconSink {
    client: Client,
    url: Url,
}

impl BeaconSink {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

impl AnalyticsSink for BeaconSink {
    fn track(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| AnalyticsError::NoRuntime)?;
        let request = self.client.post(self.url.clone()).json(&event);
        runtime.spawn(async move {
            if let Err(err) = request.send().await {
                tracing::debug!(error = %err, "Analytics beacon failed");
            }
        });
        Ok(())
    }
}

/// Reports tracked action kinds to an [`AnalyticsSink`] after they are reduced.
pub struct TelemetryMiddleware {
    tracked: HashSet<String>,
    sink: Arc<dyn AnalyticsSink>,
}

impl TelemetryMiddleware {
    pub fn new<I, S>(tracked: I, sink: Arc<dyn AnalyticsSink>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tracked: tracked.into_iter().map(Into::into).collect(),
            sink,
        }
    }

    pub fn tracks(&self, kind: &str) -> bool {
        self.tracked.contains(kind)
    }

    fn report(
        &self,
        store: &Store,
        kind: &'static str,
        properties: BTreeMap<String, serde_json::Value>,
    ) {
        let page = store
            .get_state()
            .slice::<LocationState>(crate::modules::location::SLICE_KEY)
            .map(|location| location.pathname.clone());

        let event = AnalyticsEvent {
            id: Uuid::new_v4(),
            kind,
            page,
            properties,
        };

        match catch_unwind(AssertUnwindSafe(|| self.sink.track(event))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::debug!(kind, error = %err, "Analytics event dropped"),
            Err(_) => tracing::debug!(kind, "Analytics sink panicked"),
        }
    }
}

impl Middleware for TelemetryMiddleware {
    fn name(&self) -> &'static str {
        "telemetry"
    }

    fn handle(&self, store: &Store, dispatchable: Dispatchable, next: Next<'_>) -> DispatchResult {
        let tracked = dispatchable
            .as_action()
            .filter(|action| self.tracks(action.kind()))
            .map(|action| (action.kind(), properties_of(action)));

        let result = next.run(dispatchable)?;

        if let (Some((kind, properties)), Dispatched::Applied { .. }) = (tracked, &result) {
            self.report(store, kind, properties);
        }
        Ok(result)
    }
}

fn properties_of(action: &crate::store::Action) -> BTreeMap<String, serde_json::Value> {
    use crate::modules::activity::ActivityAction;
    use crate::modules::error_modal::ErrorModalAction;
    use crate::modules::shipping_label::ShippingLabelAction;
    use crate::resource::{Received, ResourceAction};
    use crate::store::Action;

    let mut properties = BTreeMap::new();
    match action {
        Action::Activity(ActivityAction::Resource(ResourceAction::Receive {
            append, received, ..
        })) => {
            properties.insert("append".to_string(), (*append).into());
            let success = matches!(received, Received::Page(_));
            properties.insert("success".to_string(), success.into());
        }
        Action::Activity(ActivityAction::SeeMoreActivity { show }) => {
            properties.insert("show".to_string(), (*show).into());
        }
        Action::ErrorModal(ErrorModalAction::Show { message_key }) => {
            properties.insert("message_key".to_string(), message_key.clone().into());
        }
        Action::Activity(ActivityAction::PageViewed) => {
            properties.insert("content_subtype".to_string(), "History::Main".into());
        }
        Action::ShippingLabel(ShippingLabelAction::PageViewed { dispatch_id }) => {
            properties.insert(
                "content_subtype".to_string(),
                "AUS_Post_Label_Load".into(),
            );
            properties.insert("dispatch_id".to_string(), dispatch_id.clone().into());
        }
        _ => {}
    }
    properties
}
