use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::token::{TokenHandle, TokenRefresher};
use crate::modules::location::{Location, LocationAction};
use crate::store::{Store, StoreError};

/// Reacts to every committed navigation.
pub struct NavigationListener {
    store: Store,
    tokens: Arc<TokenRefresher>,
}

impl NavigationListener {
    pub fn new(store: Store, tokens: Arc<TokenRefresher>) -> Self {
        Self { store, tokens }
    }

    /// Record `location` and start a token refresh.
    ///
    /// The location update is reduced before this returns; the refresh is
    /// still in flight and can be awaited through the returned handle.
    pub fn on_navigate(&self, location: Location) -> Result<TokenHandle, StoreError> {
        tracing::info!(pathname = %location.pathname, key = %location.key, "Navigation");
        self.store.dispatch(LocationAction::Changed(location))?;
        self.tokens.refresh(&self.store)
    }

    /// Process navigations from `history` until every sender is dropped.
    pub fn listen(
        self: Arc<Self>,
        mut history: mpsc::UnboundedReceiver<Location>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(location) = history.recv().await {
                if let Err(err) = self.on_navigate(location) {
                    tracing::error!(error = %err, "Navigation handling failed");
                }
            }
            tracing::debug!("History closed; navigation listener stopping");
        })
    }
}
