use std::sync::Arc;

use async_trait::async_trait;

use super::error::LoadError;
use super::pattern::RouteParams;
use crate::modules::location::Location;
use crate::store::{DispatchResult, SliceReducer, Store};

/// The renderable unit of a feature.
///
/// Rendering happens elsewhere; the engine only mounts components, which
/// issue the feature's initial dispatch.
pub trait Component: Send + Sync {
    fn name(&self) -> &'static str;

    fn mount(&self, store: &Store, params: &RouteParams, location: &Location) -> DispatchResult;
}

/// Everything a lazily loaded feature contributes.
pub struct FeatureModule {
    pub slice_key: &'static str,
    pub reducer: Arc<dyn SliceReducer>,
    pub component: Arc<dyn Component>,
}

/// Where feature modules come from.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    async fn fetch_module(&self, route_key: &str) -> Result<FeatureModule, LoadError>;
}
