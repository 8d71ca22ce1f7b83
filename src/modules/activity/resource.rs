use std::sync::Arc;

use reqwest::Url;

use super::model::{ActivityPayload, Case, Notification};
use super::reducer::{ActivityAction, ActivityState};
use super::{SCOPE_PARAM, SLICE_KEY};
use crate::fetch::{FetchError, Fetcher};
use crate::resource::{
    fetch_first_page, fetch_next_page, GenerationCounter, Page, PagedResource, ResourceAction,
    ResourceState,
};
use crate::store::{Action, StoreState, Thunk};

/// The activity history endpoint as a paged resource.
pub struct ActivityResource {
    endpoint: Url,
    generations: GenerationCounter,
}

impl ActivityResource {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            generations: GenerationCounter::default(),
        }
    }
}

impl PagedResource for ActivityResource {
    type Item = Case;
    type Derived = Notification;

    fn name(&self) -> &'static str {
        "activity"
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn scope_param(&self) -> &'static str {
        SCOPE_PARAM
    }

    fn generations(&self) -> &GenerationCounter {
        &self.generations
    }

    fn select<'s>(&self, state: &'s StoreState) -> Option<&'s ResourceState<Case, Notification>> {
        state
            .slice::<ActivityState>(SLICE_KEY)
            .map(|activity| &activity.resource)
    }

    fn wrap(&self, action: ResourceAction<Case, Notification>) -> Action {
        ActivityAction::Resource(action).into()
    }

    fn parse(&self, body: serde_json::Value) -> Result<Page<Case, Notification>, FetchError> {
        let payload: ActivityPayload =
            serde_json::from_value(body).map_err(|err| FetchError::Malformed(err.to_string()))?;
        Ok(payload.into_page())
    }
}

/// Fetch the first page of activity, optionally scoped to one device.
pub fn fetch_all_activities(
    resource: Arc<ActivityResource>,
    fetcher: Arc<dyn Fetcher>,
    serial_number_key: Option<String>,
) -> Thunk {
    fetch_first_page(resource, fetcher, serial_number_key)
}

/// Fetch the next page of activity after the stored bookmark.
pub fn fetch_more_activities(
    resource: Arc<ActivityResource>,
    fetcher: Arc<dyn Fetcher>,
    serial_number_key: Option<String>,
) -> Thunk {
    fetch_next_page(resource, fetcher, serial_number_key)
}
