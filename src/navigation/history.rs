use tokio::sync::mpsc;

use super::error::HistoryError;
use crate::modules::location::Location;

/// In-process stand-in for browser history.
///
/// Pushes are delivered to whoever holds the receiver returned by
/// [`History::new`], normally [`NavigationListener::listen`](super::NavigationListener::listen).
#[derive(Debug, Clone)]
pub struct History {
    tx: mpsc::UnboundedSender<Location>,
}

impl History {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Location>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Commit a navigation to `path`.
    pub fn push(&self, path: &str) -> Result<Location, HistoryError> {
        let location = Location::parse(path);
        self.tx
            .send(location.clone())
            .map_err(|_| HistoryError::ListenerStopped(path.to_string()))?;
        Ok(location)
    }
}
