use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Token request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Token response did not contain csrfToken")]
    Missing,

    #[error("No token refresh has been requested yet")]
    NotRequested,

    #[error("Token refresher was dropped before the refresh settled")]
    Closed,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Navigation listener has stopped; dropped navigation to '{0}'")]
    ListenerStopped(String),
}
