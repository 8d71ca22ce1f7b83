//! Reducer traits for slices of store state.

use std::any::{type_name, TypeId};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use super::action::Action;
use super::state::SliceValue;

/// Marker trait for slice state objects.
///
/// Slice states should be:
/// - Immutable by convention (Clone to create new states)
/// - Self-contained (everything a view of the slice needs)
/// - Comparable (PartialEq lets the store keep unchanged slices shared)
pub trait SliceState: Clone + PartialEq + Default + Debug + Send + Sync + 'static {}

/// Reducer transforms a slice based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State. Actions the
/// reducer does not handle must return the state unchanged.
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer owns.
    type State: SliceState;

    /// Process an action and return the new state.
    fn reduce(state: Self::State, action: &Action) -> Self::State;
}

/// Object-safe view of a reducer, as stored in the slice registry.
pub trait SliceReducer: Send + Sync {
    /// Name of the concrete reducer, for diagnostics.
    fn reducer_name(&self) -> &'static str;

    /// Identity used to tell a re-registration from a conflicting one.
    fn reducer_id(&self) -> TypeId;

    /// The slice's default state.
    fn initial(&self) -> SliceValue;

    /// Reduce `current` (or the default when absent) with `action`.
    ///
    /// When the reducer leaves the state unchanged the original value is
    /// returned, so callers can detect no-ops by pointer identity.
    fn reduce(&self, current: Option<&SliceValue>, action: &Action) -> SliceValue;
}

/// Adapter exposing a typed [`Reducer`] as a [`SliceReducer`].
pub struct ReducerSlice<R>(PhantomData<fn() -> R>);

impl<R: Reducer> ReducerSlice<R> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Shorthand for the shared trait object the registry stores.
    pub fn shared() -> Arc<dyn SliceReducer> {
        Arc::new(Self::new())
    }
}

impl<R: Reducer> Default for ReducerSlice<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reducer> SliceReducer for ReducerSlice<R> {
    fn reducer_name(&self) -> &'static str {
        type_name::<R>()
    }

    fn reducer_id(&self) -> TypeId {
        TypeId::of::<R>()
    }

    fn initial(&self) -> SliceValue {
        Arc::new(R::State::default())
    }

    fn reduce(&self, current: Option<&SliceValue>, action: &Action) -> SliceValue {
        let previous = current.and_then(|value| {
            value
                .downcast_ref::<R::State>()
                .map(|state| (value, state))
        });

        match previous {
            Some((value, state)) => {
                let next = R::reduce(state.clone(), action);
                if &next == state {
                    Arc::clone(value)
                } else {
                    Arc::new(next) as SliceValue
                }
            }
            None => {
                if current.is_some() {
                    tracing::warn!(
                        reducer = type_name::<R>(),
                        "Slice holds a foreign state type, starting from default"
                    );
                }
                Arc::new(R::reduce(R::State::default(), action))
            }
        }
    }
}
