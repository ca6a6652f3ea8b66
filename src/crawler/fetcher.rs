//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client
//! - GET requests carrying query parameters, per-request headers and a timeout
//! - Mapping transport failures onto `HarvestError::Http`
//!
//! Status codes are not interpreted here. The pagination controller decides what a
//! 404 or a 5xx means for the area being crawled.

use crate::{HarvestError, Result};
use reqwest::Client;
use std::time::Duration;

/// One outgoing GET request
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    /// Target URL, possibly already carrying its own query string
    pub url: &'a str,
    /// Query parameters appended to the URL
    pub query: &'a [(String, String)],
    /// Headers for this request only
    pub headers: &'a [(String, String)],
    pub timeout: Duration,
}

/// A response that reached us, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded body text
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The HTTP seam of the crawler
///
/// Implementations return `Ok` for any response that arrived and
/// `Err(HarvestError::Http)` for transport failures (DNS, connect, timeout, body read).
#[allow(async_fn_in_trait)]
pub trait HttpFetch {
    async fn get(&self, request: &FetchRequest<'_>) -> Result<FetchResponse>;
}

/// Builds the HTTP client shared by every request of a run
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// Identification headers and the timeout are set per request, so the client
/// itself carries neither.
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `HttpFetch` backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new() -> Result<Self> {
        let client = build_http_client().map_err(|source| HarvestError::Http {
            url: String::new(),
            source,
        })?;
        Ok(Self { client })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpFetch for ReqwestFetcher {
    async fn get(&self, request: &FetchRequest<'_>) -> Result<FetchResponse> {
        let transport = |source| HarvestError::Http {
            url: request.url.to_string(),
            source,
        };

        let mut builder = self
            .client
            .get(request.url)
            .query(request.query)
            .timeout(request.timeout);
        for (name, value) in request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;

        Ok(FetchResponse { status, body })
    }
}
