//! Assembly of the state engine from configuration.

use std::sync::Arc;

use reqwest::Url;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::{Config, ConfigError};
use crate::fetch::{FetchError, Fetcher, HttpFetcher};
use crate::modules::activity::fetch_more_activities;
use crate::modules::agreements::AgreementsReducer;
use crate::modules::api::ApiReducer;
use crate::modules::error_modal::ErrorModalReducer;
use crate::modules::location::LocationReducer;
use crate::modules::{agreements, api, error_modal, location, Endpoints, Services};
use crate::navigation::{History, NavigationListener};
use crate::routes::{BundledModules, LazyModuleLoader, ModuleSource, Navigated, RouteError, Router};
use crate::store::{
    AnalyticsSink, BeaconSink, DispatchResult, Store, StoreError, TelemetryMiddleware,
    ThunkMiddleware, TracingSink,
};

#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// The assembled engine: store, services, navigation and routing.
pub struct Portal {
    store: Store,
    services: Arc<Services>,
    listener: Arc<NavigationListener>,
    router: Router,
}

impl Portal {
    /// Build against the reqwest fetcher, reporting telemetry to the
    /// configured beacon or to the log.
    pub fn from_config(config: &Config) -> Result<Self, PortalError> {
        let http = HttpFetcher::new(&config.api)?;
        let sink: Arc<dyn AnalyticsSink> = match &config.telemetry.beacon_url {
            Some(beacon) => {
                let url = Url::parse(beacon).map_err(|e| ConfigError::ValidationError {
                    message: format!("telemetry.beacon_url '{beacon}' is invalid: {e}"),
                })?;
                Arc::new(BeaconSink::new(http.client().clone(), url))
            }
            None => Arc::new(TracingSink),
        };
        Self::new(config, Arc::new(http), sink)
    }

    /// Build with the bundled feature modules.
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn AnalyticsSink>,
    ) -> Result<Self, PortalError> {
        let endpoints = Endpoints::from_config(&config.api)?;
        let services = Arc::new(Services::new(fetcher, endpoints, config.api.csrf_header.clone()));
        let source = Arc::new(BundledModules::new(Arc::clone(&services)));
        Self::with_modules(config, services, source, sink)
    }

    /// Build with a custom module source.
    pub fn with_modules(
        config: &Config,
        services: Arc<Services>,
        source: Arc<dyn ModuleSource>,
        sink: Arc<dyn AnalyticsSink>,
    ) -> Result<Self, PortalError> {
        let mut builder = Store::builder()
            .reducer::<LocationReducer>(location::SLICE_KEY)
            .reducer::<ApiReducer>(api::SLICE_KEY)
            .reducer::<ErrorModalReducer>(error_modal::SLICE_KEY)
            .reducer::<AgreementsReducer>(agreements::SLICE_KEY)
            .middleware(Arc::new(ThunkMiddleware));
        if config.telemetry.enabled {
            builder = builder.middleware(Arc::new(TelemetryMiddleware::new(
                config.telemetry.tracked_kinds.iter().cloned(),
                sink,
            )));
        }
        let store = builder.build()?;

        let listener = Arc::new(NavigationListener::new(
            store.clone(),
            Arc::clone(&services.tokens),
        ));
        let loader = LazyModuleLoader::new(store.clone(), source);
        let router = Router::new(
            store.clone(),
            Arc::clone(&listener),
            BundledModules::route_table(),
            loader,
        );

        tracing::info!(slices = store.get_state().len(), "Portal assembled");
        Ok(Self {
            store,
            services,
            listener,
            router,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub async fn navigate(&self, path: &str) -> Result<Navigated, RouteError> {
        self.router.navigate(path).await
    }

    /// Start observing an in-process history.
    pub fn listen(&self) -> (History, JoinHandle<()>) {
        let (history, events) = History::new();
        let task = Arc::clone(&self.listener).listen(events);
        (history, task)
    }

    /// Request the next page of activity.
    pub fn fetch_more_activities(&self, serial_number_key: Option<String>) -> DispatchResult {
        self.store.dispatch(fetch_more_activities(
            Arc::clone(&self.services.activity),
            Arc::clone(&self.services.fetcher),
            serial_number_key,
        ))
    }
}
