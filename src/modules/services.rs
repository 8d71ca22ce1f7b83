use std::sync::Arc;

use reqwest::Url;

use super::activity::ActivityResource;
use crate::config::{ApiConfig, ConfigError};
use crate::fetch::Fetcher;
use crate::navigation::TokenRefresher;

/// Resolved endpoint URLs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub activity: Url,
    pub csrf: Url,
    pub terms: Url,
    pub address_fields: Url,
    pub agreement_registration: Url,
    pub agreement_validation: Url,
}

impl Endpoints {
    pub fn from_config(api: &ApiConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            activity: api.endpoint(&api.activity_path)?,
            csrf: api.endpoint(&api.csrf_path)?,
            terms: api.endpoint(&api.terms_path)?,
            address_fields: api.endpoint(&api.address_fields_path)?,
            agreement_registration: api.endpoint(&api.agreement_registration_path)?,
            agreement_validation: api.endpoint(&api.agreement_validation_path)?,
        })
    }
}

/// Collaborators shared by every feature's thunks.
pub struct Services {
    pub fetcher: Arc<dyn Fetcher>,
    pub endpoints: Endpoints,
    pub activity: Arc<ActivityResource>,
    pub tokens: Arc<TokenRefresher>,
    /// Header the security token is sent in.
    pub csrf_header: String,
}

impl Services {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        endpoints: Endpoints,
        csrf_header: impl Into<String>,
    ) -> Self {
        let activity = Arc::new(ActivityResource::new(endpoints.activity.clone()));
        let tokens = Arc::new(TokenRefresher::new(
            Arc::clone(&fetcher),
            endpoints.csrf.clone(),
        ));
        Self {
            fetcher,
            endpoints,
            activity,
            tokens,
            csrf_header: csrf_header.into(),
        }
    }
}
