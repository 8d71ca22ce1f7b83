//! Network fetch collaborator.
//!
//! The state engine only needs "send this request, give me parsed JSON or a
//! structured error". [`Fetcher`] is that seam; [`HttpFetcher`] implements
//! it over reqwest and tests substitute scripted fetchers.

mod error;
mod http;

use async_trait::async_trait;
use reqwest::{Method, Url};

pub use error::{FailureClass, FetchError, Rejection};
pub use http::HttpFetcher;

/// A request as understood by [`Fetcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl FetchRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json(url: Url, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Performs requests and returns parsed JSON bodies.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<serde_json::Value, FetchError>;
}
