//! Generic thunks driving a paginated resource over the network.

use std::sync::Arc;

use reqwest::Url;

use super::action::ResourceAction;
use super::generation::{Generation, GenerationCounter};
use super::page::Page;
use super::query::PageQuery;
use super::state::ResourceState;
use crate::fetch::{FetchError, FetchRequest, Fetcher};
use crate::modules::error_modal::{ErrorModalAction, SERVER_ERROR_MESSAGE};
use crate::store::{Action, Dispatched, Store, StoreError, StoreState, Thunk};

/// A list resource living in one store slice and fetched page by page.
pub trait PagedResource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;
    type Derived: Clone + Send + Sync + 'static;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn endpoint(&self) -> &Url;

    /// Query parameter used to scope the resource.
    fn scope_param(&self) -> &'static str;

    fn generations(&self) -> &GenerationCounter;

    /// Locate the resource state inside the store.
    fn select<'s>(
        &self,
        state: &'s StoreState,
    ) -> Option<&'s ResourceState<Self::Item, Self::Derived>>;

    /// Wrap a lifecycle action into the owning domain's action.
    fn wrap(&self, action: ResourceAction<Self::Item, Self::Derived>) -> Action;

    /// Decode a response body into a page.
    fn parse(
        &self,
        body: serde_json::Value,
    ) -> Result<Page<Self::Item, Self::Derived>, FetchError>;
}

/// Fetch the first page and replace the resource's items with it.
///
/// A failure marks the resource as errored and keeps whatever items it had.
pub fn fetch_first_page<R: PagedResource>(
    resource: Arc<R>,
    fetcher: Arc<dyn Fetcher>,
    scope: Option<String>,
) -> Thunk {
    Thunk::new("fetch_first_page", move |store| {
        let runtime = runtime_for("fetch_first_page")?;

        let generation = resource.generations().next();
        store.dispatch(resource.wrap(ResourceAction::Request { generation }))?;
        if !is_current(resource.as_ref(), store, generation) {
            return Ok(Dispatched::Skipped);
        }

        let url = PageQuery::first_page()
            .scoped(resource.scope_param(), scope.as_deref())
            .apply(resource.endpoint());
        tracing::debug!(resource = resource.name(), %generation, %url, "Fetching first page");

        let store = store.clone();
        Ok(Dispatched::Task(runtime.spawn(async move {
            let received = fetcher
                .fetch(FetchRequest::get(url))
                .await
                .and_then(|body| resource.parse(body));

            let action = match received {
                Ok(page) => ResourceAction::receive_page(generation, false, page),
                Err(err) => {
                    tracing::warn!(resource = resource.name(), error = %err, "Fetch failed");
                    ResourceAction::receive_failure(generation, false)
                }
            };
            dispatch_logged(&store, resource.wrap(action));
        })))
    })
}

/// Fetch the page after the resource's current cursor and append it.
///
/// Skipped when the resource has no further pages or a fetch is already
/// running. A failure keeps the loaded items, leaves `has_more` set so the
/// user can retry, and shows the server-error modal once.
pub fn fetch_next_page<R: PagedResource>(
    resource: Arc<R>,
    fetcher: Arc<dyn Fetcher>,
    scope: Option<String>,
) -> Thunk {
    Thunk::new("fetch_next_page", move |store| {
        let runtime = runtime_for("fetch_next_page")?;

        let state = store.get_state();
        let current = resource.select(&state).ok_or_else(|| StoreError::Effect {
            thunk: "fetch_next_page",
            message: format!("resource '{}' is not registered", resource.name()),
        })?;
        if !current.can_request_more() {
            tracing::debug!(
                resource = resource.name(),
                phase = ?current.phase(),
                "Nothing more to fetch"
            );
            return Ok(Dispatched::Skipped);
        }
        let cursor = current.cursor.clone();

        let generation = resource.generations().next();
        store.dispatch(resource.wrap(ResourceAction::RequestMore { generation }))?;
        if !is_current(resource.as_ref(), store, generation) {
            return Ok(Dispatched::Skipped);
        }

        let url = PageQuery::after(cursor.as_ref())
            .scoped(resource.scope_param(), scope.as_deref())
            .apply(resource.endpoint());
        tracing::debug!(resource = resource.name(), %generation, %url, "Fetching next page");

        let store = store.clone();
        Ok(Dispatched::Task(runtime.spawn(async move {
            let received = fetcher
                .fetch(FetchRequest::get(url))
                .await
                .and_then(|body| resource.parse(body));

            match received {
                Ok(page) => {
                    dispatch_logged(
                        &store,
                        resource.wrap(ResourceAction::receive_page(generation, true, page)),
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        resource = resource.name(),
                        error = %err,
                        "Fetching next page failed"
                    );
                    let failure = resource.wrap(ResourceAction::receive_failure(generation, true));
                    // An ignored receive leaves every slice untouched.
                    let applied = match store.dispatch(failure) {
                        Ok(Dispatched::Applied { changed }) => changed,
                        Ok(_) => false,
                        Err(err) => {
                            tracing::error!(error = %err, "Dispatch from task failed");
                            false
                        }
                    };
                    if applied {
                        dispatch_logged(
                            &store,
                            ErrorModalAction::show(SERVER_ERROR_MESSAGE).into(),
                        );
                    } else {
                        tracing::debug!(%generation, "Superseded fetch failed; no modal");
                    }
                }
            }
        })))
    })
}

fn is_current<R: PagedResource>(resource: &R, store: &Store, generation: Generation) -> bool {
    resource
        .select(&store.get_state())
        .is_some_and(|state| state.generation == generation && state.is_pending())
}

pub(crate) fn runtime_for(thunk: &'static str) -> Result<tokio::runtime::Handle, StoreError> {
    tokio::runtime::Handle::try_current().map_err(|_| StoreError::Effect {
        thunk,
        message: "no async runtime available".to_string(),
    })
}

/// Dispatch from a spawned task, where there is no caller to return errors to.
pub(crate) fn dispatch_logged(store: &Store, action: Action) {
    let kind = action.kind();
    if let Err(err) = store.dispatch(action) {
        tracing::error!(kind, error = %err, "Dispatch from task failed");
    }
}
