//! The store handle: registry, current state and middleware pipeline.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::action::Action;
use super::error::StoreError;
use super::middleware::{DispatchResult, Dispatchable, Dispatched, Middleware, Next};
use super::reducer::{Reducer, ReducerSlice, SliceReducer};
use super::registry::{Registration, SliceRegistry};
use super::state::StoreState;

/// Shared handle to the state store.
///
/// Cloning the handle is cheap; every clone refers to the same store. All
/// state transitions go through [`Store::dispatch`] and are applied one at a
/// time, so dispatches issued in sequence are reduced in that sequence.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    core: Mutex<StoreCore>,
    middleware: Vec<Arc<dyn Middleware>>,
    published: watch::Sender<StoreState>,
}

struct StoreCore {
    registry: SliceRegistry,
    state: StoreState,
    revision: u64,
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Send a value through the middleware pipeline.
    ///
    /// Plain actions are reduced before this returns. Thunks run
    /// synchronously and may start asynchronous work that dispatches again
    /// when it completes.
    pub fn dispatch(&self, dispatchable: impl Into<Dispatchable>) -> DispatchResult {
        let dispatchable = dispatchable.into();
        tracing::trace!(kind = dispatchable.label(), "Dispatch");
        Next::new(self, &self.inner.middleware).run(dispatchable)
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> StoreState {
        self.inner.core.lock().state.clone()
    }

    /// Receiver that observes every new state snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.inner.published.subscribe()
    }

    /// Number of times the slice registry has been rebuilt.
    pub fn revision(&self) -> u64 {
        self.inner.core.lock().revision
    }

    pub fn has_slice(&self, key: &str) -> bool {
        self.inner.core.lock().registry.contains(key)
    }

    /// Register a slice reducer under `key`.
    ///
    /// Re-registering the same reducer is a no-op. Every other slice keeps
    /// its accumulated state; the new slice starts from its default.
    ///
    /// # Errors
    /// Returns `DuplicateSlice` if a different reducer already owns `key`.
    pub fn register_slice(
        &self,
        key: &str,
        reducer: Arc<dyn SliceReducer>,
    ) -> Result<(), StoreError> {
        let mut core = self.inner.core.lock();
        match core.registry.with_slice(key, reducer)? {
            Registration::Unchanged => {
                tracing::debug!(slice = key, "Slice already registered");
                Ok(())
            }
            Registration::Rebuilt(registry) => {
                tracing::info!(slice = key, "Registering slice");
                self.install(&mut core, registry);
                Ok(())
            }
        }
    }

    /// Register the typed reducer `R` under `key`.
    pub fn register<R: Reducer>(&self, key: &str) -> Result<(), StoreError> {
        self.register_slice(key, ReducerSlice::<R>::shared())
    }

    /// Hot-swap the reducer under `key`, keeping the slice's current state.
    pub fn replace_slice(&self, key: &str, reducer: Arc<dyn SliceReducer>) {
        let mut core = self.inner.core.lock();
        tracing::info!(
            slice = key,
            reducer = reducer.reducer_name(),
            "Replacing slice reducer"
        );
        let registry = core.registry.replacing(key, reducer);
        self.install(&mut core, registry);
    }

    fn install(&self, core: &mut StoreCore, registry: SliceRegistry) {
        let (state, _) = registry.reduce(&core.state, &Action::Init);
        core.registry = registry;
        core.state = state.clone();
        core.revision += 1;
        self.inner.published.send_replace(state);
    }

    /// Terminal stage of the pipeline: run the reducers.
    pub(crate) fn apply(&self, dispatchable: Dispatchable) -> DispatchResult {
        let action = match dispatchable {
            Dispatchable::Action(action) => action,
            Dispatchable::Thunk(thunk) => {
                return Err(StoreError::UnhandledThunk { name: thunk.name() })
            }
        };

        let mut core = self.inner.core.lock();
        let (state, changed) = core.registry.reduce(&core.state, &action);
        if changed {
            core.state = state.clone();
            self.inner.published.send_replace(state);
        }
        tracing::debug!(kind = action.kind(), changed, "Reduced");
        Ok(Dispatched::Applied { changed })
    }
}

/// Builder for [`Store`]: initial slices and the middleware chain.
#[derive(Default)]
pub struct StoreBuilder {
    slices: Vec<(String, Arc<dyn SliceReducer>)>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl StoreBuilder {
    pub fn slice(mut self, key: &str, reducer: Arc<dyn SliceReducer>) -> Self {
        self.slices.push((key.to_string(), reducer));
        self
    }

    pub fn reducer<R: Reducer>(self, key: &str) -> Self {
        self.slice(key, ReducerSlice::<R>::shared())
    }

    /// Append a middleware; the first one added sees dispatches first.
    pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Compose the store.
    ///
    /// # Errors
    /// - `DuplicateSlice` for conflicting slice keys
    /// - `MiddlewareOrder` if a plain-action middleware precedes the thunk runner
    pub fn build(self) -> Result<Store, StoreError> {
        validate_order(&self.middleware)?;

        let mut registry = SliceRegistry::new();
        for (key, reducer) in self.slices {
            if let Registration::Rebuilt(next) = registry.with_slice(&key, reducer)? {
                registry = next;
            }
        }

        let (state, _) = registry.reduce(&StoreState::default(), &Action::Init);
        let (published, _) = watch::channel(state.clone());

        Ok(Store {
            inner: Arc::new(StoreInner {
                core: Mutex::new(StoreCore {
                    registry,
                    state,
                    revision: 0,
                }),
                middleware: self.middleware,
                published,
            }),
        })
    }
}

fn validate_order(chain: &[Arc<dyn Middleware>]) -> Result<(), StoreError> {
    let Some(thunk_at) = chain.iter().position(|m| !m.expects_plain_actions()) else {
        return Ok(());
    };

    match chain[..thunk_at].iter().find(|m| m.expects_plain_actions()) {
        Some(misplaced) => Err(StoreError::MiddlewareOrder {
            middleware: misplaced.name(),
            thunk: chain[thunk_at].name(),
        }),
        None => Ok(()),
    }
}
