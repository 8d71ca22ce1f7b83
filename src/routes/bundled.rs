use std::sync::Arc;

use async_trait::async_trait;

use super::component::{Component, FeatureModule, ModuleSource};
use super::error::LoadError;
use super::pattern::{RouteParams, RouteTable};
use crate::modules::activity::{self, fetch_all_activities, ActivityAction, ActivityReducer};
use crate::modules::location::Location;
use crate::modules::shipping_label::{self, ShippingLabelAction, ShippingLabelReducer};
use crate::modules::Services;
use crate::store::{DispatchResult, ReducerSlice, Store};

pub const ACTIVITY_ROUTE: &str = "activity";
pub const SHIPPING_LABEL_ROUTE: &str = "shippingLabel";

/// Feature modules compiled into the binary.
pub struct BundledModules {
    services: Arc<Services>,
}

impl BundledModules {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    /// Routes served by the bundled modules.
    pub fn route_table() -> RouteTable {
        RouteTable::new()
            .route("/activity", ACTIVITY_ROUTE)
            .route("/repairs/shippingLabel/dispatchId/:dispatchId", SHIPPING_LABEL_ROUTE)
    }
}

#[async_trait]
impl ModuleSource for BundledModules {
    async fn fetch_module(&self, route_key: &str) -> Result<FeatureModule, LoadError> {
        match route_key {
            ACTIVITY_ROUTE => Ok(FeatureModule {
                slice_key: activity::SLICE_KEY,
                reducer: ReducerSlice::<ActivityReducer>::shared(),
                component: Arc::new(ActivityView {
                    services: Arc::clone(&self.services),
                }),
            }),
            SHIPPING_LABEL_ROUTE => Ok(FeatureModule {
                slice_key: shipping_label::SLICE_KEY,
                reducer: ReducerSlice::<ShippingLabelReducer>::shared(),
                component: Arc::new(ShippingLabelView),
            }),
            other => Err(LoadError::UnknownRoute(other.to_string())),
        }
    }
}

/// Activity history page; fetches the first page on mount.
struct ActivityView {
    services: Arc<Services>,
}

impl Component for ActivityView {
    fn name(&self) -> &'static str {
        "ActivityView"
    }

    fn mount(&self, store: &Store, _params: &RouteParams, location: &Location) -> DispatchResult {
        let scope = location
            .query_param(activity::SCOPE_PARAM)
            .filter(|key| !key.is_empty());
        store.dispatch(ActivityAction::PageViewed)?;
        store.dispatch(fetch_all_activities(
            Arc::clone(&self.services.activity),
            Arc::clone(&self.services.fetcher),
            scope,
        ))
    }
}

/// Printable shipping label page.
struct ShippingLabelView;

impl Component for ShippingLabelView {
    fn name(&self) -> &'static str {
        "ShippingLabelView"
    }

    fn mount(&self, store: &Store, params: &RouteParams, _location: &Location) -> DispatchResult {
        let dispatch_id = params.get("dispatchId").unwrap_or_default().to_string();
        store.dispatch(ShippingLabelAction::PageViewed { dispatch_id })
    }
}
