//! Middleware pipeline between `dispatch` and the reducers.
//!
//! Each middleware sees the dispatched value together with a [`Next`]
//! continuation for the rest of the chain. It may forward the value, forward
//! something else, dispatch further values through the store, or return
//! without forwarding (veto).

use std::fmt;

use tokio::task::JoinHandle;

use super::action::Action;
use super::error::StoreError;
use super::store::Store;
use super::thunk::Thunk;

/// A value accepted by [`Store::dispatch`]: plain data or a deferred effect.
pub enum Dispatchable {
    Action(Action),
    Thunk(Thunk),
}

impl Dispatchable {
    /// Kind of the plain action, or the thunk's name.
    pub fn label(&self) -> &'static str {
        match self {
            Dispatchable::Action(action) => action.kind(),
            Dispatchable::Thunk(thunk) => thunk.name(),
        }
    }

    pub fn as_action(&self) -> Option<&Action> {
        match self {
            Dispatchable::Action(action) => Some(action),
            Dispatchable::Thunk(_) => None,
        }
    }
}

impl fmt::Debug for Dispatchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatchable::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Dispatchable::Thunk(thunk) => f.debug_tuple("Thunk").field(&thunk.name()).finish(),
        }
    }
}

impl From<Action> for Dispatchable {
    fn from(action: Action) -> Self {
        Dispatchable::Action(action)
    }
}

impl From<Thunk> for Dispatchable {
    fn from(thunk: Thunk) -> Self {
        Dispatchable::Thunk(thunk)
    }
}

/// What happened to a dispatched value.
#[derive(Debug)]
pub enum Dispatched {
    /// A plain action reached the reducers.
    Applied { changed: bool },
    /// A thunk started asynchronous work that re-enters via `dispatch`.
    Task(JoinHandle<()>),
    /// A thunk decided there was nothing to do.
    Skipped,
    /// A middleware stopped the value before it reached the reducers.
    Vetoed,
}

impl Dispatched {
    /// Wait for any asynchronous work started by the dispatch.
    pub async fn settled(self) {
        if let Dispatched::Task(handle) = self {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "Dispatched task did not complete");
            }
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Dispatched::Applied { .. })
    }
}

pub type DispatchResult = Result<Dispatched, StoreError>;

/// An interceptor in the dispatch pipeline.
pub trait Middleware: Send + Sync {
    /// Name used in logs and ordering errors.
    fn name(&self) -> &'static str;

    /// Whether this middleware only understands plain actions.
    ///
    /// The store refuses to build a pipeline where such a middleware runs
    /// before the one that executes thunks.
    fn expects_plain_actions(&self) -> bool {
        true
    }

    /// Handle `dispatchable`, usually by calling `next.run(..)`.
    fn handle(&self, store: &Store, dispatchable: Dispatchable, next: Next<'_>)
        -> DispatchResult;
}

/// Continuation for the remainder of the middleware chain.
pub struct Next<'a> {
    store: &'a Store,
    rest: &'a [std::sync::Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(store: &'a Store, chain: &'a [std::sync::Arc<dyn Middleware>]) -> Self {
        Self { store, rest: chain }
    }

    /// Forward to the next middleware, or to the reducers after the last one.
    pub fn run(self, dispatchable: Dispatchable) -> DispatchResult {
        match self.rest.split_first() {
            Some((head, rest)) => head.handle(
                self.store,
                dispatchable,
                Next {
                    store: self.store,
                    rest,
                },
            ),
            None => self.store.apply(dispatchable),
        }
    }
}
