//! Dispatch pipeline: thunks, ordering, vetoes and telemetry.

mod common;

use std::sync::Arc;

use common::{RecordingMiddleware, RecordingSink};
use portal_state::modules::error_modal::{ErrorModalAction, ErrorModalReducer, ErrorModalState};
use portal_state::modules::location::{Location, LocationAction, LocationReducer};
use portal_state::store::{
    AnalyticsError, AnalyticsEvent, AnalyticsSink, DispatchResult, Dispatchable, Dispatched,
    Middleware, Next, Store, StoreError, TelemetryMiddleware, Thunk, ThunkMiddleware,
};

/// Stops every hide request before it reaches the reducers.
struct VetoHide;

impl Middleware for VetoHide {
    fn name(&self) -> &'static str {
        "veto-hide"
    }

    fn handle(&self, _store: &Store, dispatchable: Dispatchable, next: Next<'_>) -> DispatchResult {
        if dispatchable.label() == ErrorModalAction::HIDE {
            return Ok(Dispatched::Vetoed);
        }
        next.run(dispatchable)
    }
}

struct FailingSink;

impl AnalyticsSink for FailingSink {
    fn track(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::Rejected("quota exceeded".to_string()))
    }
}

struct PanickingSink;

impl AnalyticsSink for PanickingSink {
    fn track(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        panic!("sink exploded");
    }
}

fn modal(store: &Store) -> ErrorModalState {
    store
        .get_state()
        .slice::<ErrorModalState>("errorModalData")
        .cloned()
        .unwrap()
}

#[test]
fn thunk_runs_with_store_access() {
    let recorder = RecordingMiddleware::new();
    let store = Store::builder()
        .reducer::<ErrorModalReducer>("errorModalData")
        .middleware(Arc::new(ThunkMiddleware))
        .middleware(recorder.clone())
        .build()
        .unwrap();

    let thunk = Thunk::new("show_twice", |store| {
        store.dispatch(ErrorModalAction::show("first"))?;
        let visible = store
            .get_state()
            .slice::<ErrorModalState>("errorModalData")
            .is_some_and(|modal| modal.visible);
        assert!(visible, "state is readable between dispatches");
        store.dispatch(ErrorModalAction::show("second"))
    });

    let result = store.dispatch(thunk).unwrap();
    assert!(result.is_applied());
    assert_eq!(modal(&store).message_key.as_deref(), Some("second"));
    // The plain-action middleware only ever saw plain actions.
    assert_eq!(recorder.seen(), vec![ErrorModalAction::SHOW, ErrorModalAction::SHOW]);
}

#[test]
fn synchronous_thunk_error_reaches_call_site() {
    let store = Store::builder()
        .middleware(Arc::new(ThunkMiddleware))
        .build()
        .unwrap();

    let err = store
        .dispatch(Thunk::new("broken", |_| {
            Err(StoreError::Effect {
                thunk: "broken",
                message: "bad input".to_string(),
            })
        }))
        .unwrap_err();
    assert!(matches!(err, StoreError::Effect { thunk: "broken", .. }));
}

#[test]
fn thunk_without_interceptor_is_an_error() {
    let store = Store::builder().build().unwrap();
    let err = store
        .dispatch(Thunk::new("orphan", |_| Ok(Dispatched::Skipped)))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnhandledThunk { name: "orphan" }));
}

#[test]
fn plain_action_middleware_before_thunks_is_rejected() {
    let result = Store::builder()
        .middleware(RecordingMiddleware::new())
        .middleware(Arc::new(ThunkMiddleware))
        .build();
    assert!(matches!(
        result,
        Err(StoreError::MiddlewareOrder {
            middleware: "recording",
            thunk: "thunk"
        })
    ));
}

#[test]
fn middleware_can_veto() {
    let store = Store::builder()
        .reducer::<ErrorModalReducer>("errorModalData")
        .middleware(Arc::new(ThunkMiddleware))
        .middleware(Arc::new(VetoHide))
        .build()
        .unwrap();

    store.dispatch(ErrorModalAction::show("kept")).unwrap();
    let result = store.dispatch(ErrorModalAction::Hide).unwrap();

    assert!(matches!(result, Dispatched::Vetoed));
    assert!(modal(&store).visible);
}

#[test]
fn telemetry_reports_after_reduction() {
    let sink = RecordingSink::new();
    let store = Store::builder()
        .reducer::<LocationReducer>("location")
        .reducer::<ErrorModalReducer>("errorModalData")
        .middleware(Arc::new(ThunkMiddleware))
        .middleware(Arc::new(TelemetryMiddleware::new(
            [LocationAction::CHANGED, ErrorModalAction::SHOW],
            sink.clone(),
        )))
        .build()
        .unwrap();

    store
        .dispatch(LocationAction::Changed(Location::parse("/activity")))
        .unwrap();
    store.dispatch(ErrorModalAction::show("serverErrorMessage")).unwrap();
    store.dispatch(ErrorModalAction::Hide).unwrap();

    let events = sink.events();
    assert_eq!(sink.kinds(), vec![LocationAction::CHANGED, ErrorModalAction::SHOW]);
    // The location event already sees the new location.
    assert_eq!(events[0].page.as_deref(), Some("/activity"));
    assert_eq!(events[1].properties["message_key"], "serverErrorMessage");
    assert_ne!(events[0].id, events[1].id);
}

#[test]
fn vetoed_actions_are_not_reported() {
    let sink = RecordingSink::new();
    let store = Store::builder()
        .reducer::<ErrorModalReducer>("errorModalData")
        .middleware(Arc::new(ThunkMiddleware))
        .middleware(Arc::new(TelemetryMiddleware::new([ErrorModalAction::HIDE], sink.clone())))
        .middleware(Arc::new(VetoHide))
        .build()
        .unwrap();

    store.dispatch(ErrorModalAction::Hide).unwrap();
    assert!(sink.events().is_empty());
}

#[test]
fn sink_failures_never_fail_the_dispatch() {
    for sink in [Arc::new(FailingSink) as Arc<dyn AnalyticsSink>, Arc::new(PanickingSink)] {
        let store = Store::builder()
            .reducer::<ErrorModalReducer>("errorModalData")
            .middleware(Arc::new(ThunkMiddleware))
            .middleware(Arc::new(TelemetryMiddleware::new([ErrorModalAction::SHOW], sink)))
            .build()
            .unwrap();

        let result = store.dispatch(ErrorModalAction::show("x")).unwrap();
        assert!(result.is_applied());
        assert!(modal(&store).visible);
    }
}
