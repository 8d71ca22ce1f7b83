use thiserror::Error;

use crate::store::StoreError;

/// Failure to load a feature module.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No module is bundled for route '{0}'")]
    UnknownRoute(String),

    #[error("Fetching module for route '{route}' failed: {message}")]
    Fetch { route: String, message: String },

    #[error("Registering module slice failed: {0}")]
    Register(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("No route matches '{0}'")]
    NotFound(String),

    /// The module could not be loaded; nothing was mounted.
    #[error("Navigation to '{path}' aborted: {source}")]
    Aborted {
        path: String,
        #[source]
        source: LoadError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
