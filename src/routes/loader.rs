use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use super::component::{Component, ModuleSource};
use super::error::LoadError;
use crate::store::Store;

type Slot = Arc<OnceCell<Arc<dyn Component>>>;

/// Loads feature modules on first use and registers their slices.
///
/// Loading is memoized per route key: once a module has loaded, later
/// calls return the same component without fetching or registering again.
/// Concurrent first loads of one route share a single fetch. A failed load
/// is not remembered, so the next navigation tries again.
pub struct LazyModuleLoader {
    store: Store,
    source: Arc<dyn ModuleSource>,
    loaded: Mutex<HashMap<String, Slot>>,
}

impl LazyModuleLoader {
    pub fn new(store: Store, source: Arc<dyn ModuleSource>) -> Self {
        Self {
            store,
            source,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the component for `route_key`, loading its module first if needed.
    pub async fn load(&self, route_key: &str) -> Result<Arc<dyn Component>, LoadError> {
        let slot = Arc::clone(self.loaded.lock().entry(route_key.to_string()).or_default());

        let component = slot
            .get_or_try_init(|| async {
                tracing::info!(route = route_key, "Loading feature module");
                let module = self.source.fetch_module(route_key).await?;
                self.store.register_slice(module.slice_key, module.reducer)?;
                Ok::<_, LoadError>(module.component)
            })
            .await?;
        Ok(Arc::clone(component))
    }

    pub fn is_loaded(&self, route_key: &str) -> bool {
        self.loaded
            .lock()
            .get(route_key)
            .is_some_and(|slot| slot.initialized())
    }
}
