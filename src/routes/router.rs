use std::sync::Arc;

use super::error::RouteError;
use super::loader::LazyModuleLoader;
use super::pattern::RouteTable;
use crate::modules::error_modal::{ErrorModalAction, SERVER_ERROR_MESSAGE};
use crate::modules::location::Location;
use crate::navigation::{NavigationListener, TokenHandle};
use crate::resource::dispatch_logged;
use crate::store::{Dispatched, Store};

/// Outcome of a successful navigation.
#[derive(Debug)]
pub struct Navigated {
    pub route: &'static str,
    /// Token refresh started by this navigation.
    pub token: TokenHandle,
    /// Result of the component's initial dispatch.
    pub mounted: Dispatched,
}

/// Drives a navigation from path to mounted component.
pub struct Router {
    store: Store,
    listener: Arc<NavigationListener>,
    table: RouteTable,
    loader: LazyModuleLoader,
}

impl Router {
    pub fn new(
        store: Store,
        listener: Arc<NavigationListener>,
        table: RouteTable,
        loader: LazyModuleLoader,
    ) -> Self {
        Self {
            store,
            listener,
            table,
            loader,
        }
    }

    pub fn loader(&self) -> &LazyModuleLoader {
        &self.loader
    }

    /// Commit a navigation to `path` and mount the matching feature.
    ///
    /// # Errors
    /// - `NotFound` if no route matches
    /// - `Aborted` if the module failed to load; the error modal is shown
    pub async fn navigate(&self, path: &str) -> Result<Navigated, RouteError> {
        let location = Location::parse(path);
        let token = self.listener.on_navigate(location.clone())?;

        let Some((route, params)) = self.table.resolve(&location.pathname) else {
            tracing::warn!(pathname = %location.pathname, "No route matches");
            return Err(RouteError::NotFound(location.pathname));
        };

        let component = match self.loader.load(route).await {
            Ok(component) => component,
            Err(err) => {
                tracing::error!(route, error = %err, "Module load failed; navigation aborted");
                dispatch_logged(&self.store, ErrorModalAction::show(SERVER_ERROR_MESSAGE).into());
                return Err(RouteError::Aborted {
                    path: path.to_string(),
                    source: err,
                });
            }
        };

        tracing::debug!(route, component = component.name(), "Mounting");
        let mounted = component.mount(&self.store, &params, &location)?;
        Ok(Navigated {
            route,
            token,
            mounted,
        })
    }
}
