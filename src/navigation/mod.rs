//! Navigation: in-process history, the listener reacting to committed
//! navigations, and the security-token refresh those navigations trigger.
//!
//! Each navigation updates the `location` slice synchronously and starts a
//! token refresh. Refreshes are numbered; a refresh that resolves after a
//! newer one is discarded, and callers that need a token for a mutating
//! request await a [`TokenHandle`] instead of reading the slice.

mod error;
mod history;
mod listener;
mod token;

pub use error::{HistoryError, TokenError};
pub use history::History;
pub use listener::NavigationListener;
pub use token::{TokenHandle, TokenRefresher};
