//! Thunks: dispatchable units of deferred, effectful work.

use super::middleware::{DispatchResult, Dispatchable, Middleware, Next};
use super::store::Store;

type ThunkFn = Box<dyn FnOnce(&Store) -> DispatchResult + Send>;

/// A named effect that receives the store when dispatched.
///
/// The closure runs synchronously inside `dispatch`; anything it returns as
/// an `Err` surfaces at the dispatch call site. Asynchronous work is started
/// with `tokio::spawn` and reported as [`Dispatched::Task`](super::Dispatched::Task).
pub struct Thunk {
    name: &'static str,
    run: ThunkFn,
}

impl Thunk {
    pub fn new<F>(name: &'static str, run: F) -> Self
    where
        F: FnOnce(&Store) -> DispatchResult + Send + 'static,
    {
        Self {
            name,
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn call(self, store: &Store) -> DispatchResult {
        (self.run)(store)
    }
}

/// Executes thunks instead of forwarding them down the chain.
///
/// Must come before any middleware that expects plain actions.
#[derive(Debug, Default)]
pub struct ThunkMiddleware;

impl Middleware for ThunkMiddleware {
    fn name(&self) -> &'static str {
        "thunk"
    }

    fn expects_plain_actions(&self) -> bool {
        false
    }

    fn handle(&self, store: &Store, dispatchable: Dispatchable, next: Next<'_>) -> DispatchResult {
        match dispatchable {
            Dispatchable::Thunk(thunk) => {
                tracing::trace!(thunk = thunk.name(), "Running thunk");
                thunk.call(store)
            }
            action => next.run(action),
        }
    }
}
