use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reqwest::Url;
use serde::Deserialize;
use tokio::sync::watch;

use super::error::TokenError;
use crate::fetch::{FetchRequest, Fetcher};
use crate::modules::api::ApiAction;
use crate::resource::{dispatch_logged, runtime_for};
use crate::store::{Store, StoreError};

/// Outcome of the newest refresh that has resolved so far.
#[derive(Debug, Clone, Default)]
struct TokenSlot {
    sequence: u64,
    outcome: Option<Result<String, TokenError>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    csrf_token: Option<String>,
}

/// Re-requests the security token and orders the results.
///
/// Every call to [`refresh`](Self::refresh) takes the next sequence number.
/// A result is published only if no newer refresh has resolved first, both
/// here and in the `api` slice reducer.
pub struct TokenRefresher {
    fetcher: Arc<dyn Fetcher>,
    url: Url,
    issued: AtomicU64,
    settled: watch::Sender<TokenSlot>,
}

impl TokenRefresher {
    pub fn new(fetcher: Arc<dyn Fetcher>, url: Url) -> Self {
        let (settled, _) = watch::channel(TokenSlot::default());
        Self {
            fetcher,
            url,
            issued: AtomicU64::new(0),
            settled,
        }
    }

    /// Start a refresh and return a handle resolving to its token, or to a
    /// newer one if a later refresh wins.
    ///
    /// # Errors
    /// Returns `StoreError::Effect` when called outside a tokio runtime.
    pub fn refresh(self: &Arc<Self>, store: &Store) -> Result<TokenHandle, StoreError> {
        let runtime = runtime_for("refresh_token")?;
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(sequence, url = %self.url, "Refreshing security token");

        let this = Arc::clone(self);
        let store = store.clone();
        runtime.spawn(async move {
            let outcome = this.request().await;
            match &outcome {
                Ok(token) => dispatch_logged(
                    &store,
                    ApiAction::TokenReceived {
                        sequence,
                        token: token.clone(),
                    }
                    .into(),
                ),
                Err(err) => tracing::warn!(sequence, error = %err, "Token refresh failed"),
            }
            this.settle(sequence, outcome);
        });

        Ok(self.handle(sequence))
    }

    /// Handle for the most recently issued refresh.
    pub fn latest(&self) -> TokenHandle {
        self.handle(self.issued.load(Ordering::SeqCst))
    }

    /// Number of refreshes issued so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    fn handle(&self, sequence: u64) -> TokenHandle {
        TokenHandle {
            sequence,
            settled: self.settled.subscribe(),
        }
    }

    async fn request(&self) -> Result<String, TokenError> {
        let body = self.fetcher.fetch(FetchRequest::get(self.url.clone())).await?;
        let response: TokenResponse =
            serde_json::from_value(body).map_err(|_| TokenError::Missing)?;
        response
            .csrf_token
            .filter(|token| !token.is_empty())
            .ok_or(TokenError::Missing)
    }

    fn settle(&self, sequence: u64, outcome: Result<String, TokenError>) {
        let published = self.settled.send_if_modified(|slot| {
            if sequence <= slot.sequence {
                return false;
            }
            *slot = TokenSlot {
                sequence,
                outcome: Some(outcome),
            };
            true
        });
        if !published {
            tracing::debug!(sequence, "Discarding token from superseded refresh");
        }
    }
}

/// Awaitable result of one token refresh.
#[derive(Debug, Clone)]
pub struct TokenHandle {
    sequence: u64,
    settled: watch::Receiver<TokenSlot>,
}

impl TokenHandle {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Wait until this refresh, or a newer one, has resolved.
    pub async fn token(mut self) -> Result<String, TokenError> {
        if self.sequence == 0 {
            return Err(TokenError::NotRequested);
        }
        let sequence = self.sequence;
        let slot = self
            .settled
            .wait_for(|slot| slot.sequence >= sequence)
            .await
            .map_err(|_| TokenError::Closed)?;
        slot.outcome.clone().unwrap_or(Err(TokenError::NotRequested))
    }
}
