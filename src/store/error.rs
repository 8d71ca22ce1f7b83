use thiserror::Error;

/// Errors surfaced by the store at the dispatch or registration call site.
///
/// Reducers never fail; everything here is either a wiring mistake or an
/// effect that failed before it reached the network.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A different reducer is already registered under this key.
    #[error("Slice '{key}' is already registered with reducer {existing}, refusing {attempted}")]
    DuplicateSlice {
        key: String,
        existing: &'static str,
        attempted: &'static str,
    },

    /// A thunk travelled the whole pipeline without being executed.
    #[error("Thunk '{name}' reached the reducers; is ThunkMiddleware installed?")]
    UnhandledThunk { name: &'static str },

    /// A middleware that assumes plain actions sits before the thunk interceptor.
    #[error("Middleware '{middleware}' expects plain actions but is ordered before '{thunk}'")]
    MiddlewareOrder {
        middleware: &'static str,
        thunk: &'static str,
    },

    /// A thunk failed synchronously, before issuing any network request.
    #[error("Effect '{thunk}' failed: {message}")]
    Effect { thunk: &'static str, message: String },
}
