use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::FetchError;
use super::{FetchRequest, Fetcher};
use crate::config::ApiConfig;

/// [`Fetcher`] backed by a reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the configured timeouts.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .map_err(|e| FetchError::Transport {
                url: config.base_url.clone(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<serde_json::Value, FetchError> {
        let url = request.url.to_string();
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            message: format!("Failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "Request rejected");
            return Err(FetchError::from_status(status.as_u16(), &body));
        }

        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
