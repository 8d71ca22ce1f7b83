//! Slice registration and replacement on a live store.

use std::sync::Arc;

use portal_state::modules::agreements::AgreementsReducer;
use portal_state::modules::error_modal::{
    ErrorModalAction, ErrorModalReducer, ErrorModalState, SERVER_ERROR_MESSAGE,
};
use portal_state::modules::location::{Location, LocationAction, LocationReducer, LocationState};
use portal_state::store::{
    Action, Dispatched, Reducer, ReducerSlice, Store, StoreError, ThunkMiddleware,
};

/// Same state type as the error modal, but ignores hide requests.
struct StickyModalReducer;

impl Reducer for StickyModalReducer {
    type State = ErrorModalState;

    fn reduce(state: Self::State, action: &Action) -> Self::State {
        match action {
            Action::ErrorModal(ErrorModalAction::Hide) => state,
            other => ErrorModalReducer::reduce(state, other),
        }
    }
}

fn store() -> Store {
    Store::builder()
        .reducer::<LocationReducer>("location")
        .middleware(Arc::new(ThunkMiddleware))
        .build()
        .unwrap()
}

#[test]
fn late_registration_keeps_other_slices() {
    let store = store();
    store
        .dispatch(LocationAction::Changed(Location::parse("/activity?x=1")))
        .unwrap();
    let before = store.get_state();

    store.register::<ErrorModalReducer>("errorModalData").unwrap();

    let after = store.get_state();
    assert_eq!(
        after.slice::<LocationState>("location").unwrap().pathname,
        "/activity"
    );
    assert!(after.same_slice(&before, "location"));
    assert_eq!(
        after.slice::<ErrorModalState>("errorModalData"),
        Some(&ErrorModalState::default())
    );
    assert_eq!(store.revision(), 1);
}

#[test]
fn registering_same_reducer_twice_is_a_no_op() {
    let store = store();
    store.register::<ErrorModalReducer>("errorModalData").unwrap();
    store
        .dispatch(ErrorModalAction::show(SERVER_ERROR_MESSAGE))
        .unwrap();

    store.register::<ErrorModalReducer>("errorModalData").unwrap();

    assert_eq!(store.revision(), 1);
    assert!(store
        .get_state()
        .slice::<ErrorModalState>("errorModalData")
        .unwrap()
        .visible);
}

#[test]
fn different_reducer_under_existing_key_is_rejected() {
    let store = store();
    store.register::<ErrorModalReducer>("errorModalData").unwrap();

    let err = store
        .register::<AgreementsReducer>("errorModalData")
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlice { ref key, .. } if key == "errorModalData"));
    assert_eq!(store.revision(), 1);
}

#[test]
fn builder_rejects_duplicate_keys() {
    let result = Store::builder()
        .reducer::<ErrorModalReducer>("shared")
        .reducer::<LocationReducer>("shared")
        .build();
    assert!(matches!(result, Err(StoreError::DuplicateSlice { .. })));
}

#[test]
fn replace_slice_hot_swaps_and_keeps_state() {
    let store = store();
    store.register::<ErrorModalReducer>("errorModalData").unwrap();
    store.dispatch(ErrorModalAction::show("first")).unwrap();

    store.replace_slice("errorModalData", ReducerSlice::<StickyModalReducer>::shared());

    let state = store.get_state();
    let modal = state.slice::<ErrorModalState>("errorModalData").unwrap();
    assert!(modal.visible);
    assert_eq!(modal.message_key.as_deref(), Some("first"));

    // The new reducer is in charge now.
    store.dispatch(ErrorModalAction::Hide).unwrap();
    assert!(store
        .get_state()
        .slice::<ErrorModalState>("errorModalData")
        .unwrap()
        .visible);
    assert_eq!(store.revision(), 2);
}

#[test]
fn unchanged_slices_keep_identity_across_dispatch() {
    let store = store();
    store.register::<ErrorModalReducer>("errorModalData").unwrap();
    let before = store.get_state();

    let result = store.dispatch(ErrorModalAction::show("boom")).unwrap();
    assert!(matches!(result, Dispatched::Applied { changed: true }));

    let after = store.get_state();
    assert!(after.same_slice(&before, "location"));
    assert!(!after.same_slice(&before, "errorModalData"));

    // Hiding twice: the second one changes nothing.
    store.dispatch(ErrorModalAction::Hide).unwrap();
    let result = store.dispatch(ErrorModalAction::Hide).unwrap();
    assert!(matches!(result, Dispatched::Applied { changed: false }));
}

#[tokio::test]
async fn subscribers_observe_registration() {
    let store = store();
    let mut rx = store.subscribe();
    assert!(!rx.borrow_and_update().contains("errorModalData"));

    store.register::<ErrorModalReducer>("errorModalData").unwrap();

    rx.changed().await.unwrap();
    assert!(rx.borrow().contains("errorModalData"));
}
