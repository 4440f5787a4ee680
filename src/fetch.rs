//! Page fetching over HTTP.
//!
//! All network access in the pipeline goes through the [`Fetch`] trait:
//! one GET, returning the raw markup plus the transport-level
//! `Last-Modified` timestamp when the server sends one. The crawl and
//! enrichment code only ever sees this contract, which keeps it testable
//! against canned pages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::{FetchError, Result};

/// Per-request timeout for every outbound fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A fetched page: raw markup plus transport metadata.
#[derive(Debug, Clone)]
pub struct Page {
    /// The response body as text.
    pub body: String,
    /// The `Last-Modified` response header, when present and parseable.
    pub last_modified: Option<DateTime<Utc>>,
}

/// One outbound HTTP GET. No retries at this layer; retry policy, if any,
/// belongs to the caller.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch `url`, failing on network errors, timeouts, or non-2xx status.
    async fn fetch(&self, url: &str) -> Result<Page>;
}

#[async_trait]
impl<F: Fetch + ?Sized> Fetch for std::sync::Arc<F> {
    async fn fetch(&self, url: &str) -> Result<Page> {
        (**self).fetch(url).await
    }
}

/// [`Fetch`] implementation backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the default per-request timeout.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Page> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let last_modified = response
            .headers()
            .get(reqwest::header::LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_http_date);

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        debug!(bytes = body.len(), ?last_modified, "Fetched page");
        Ok(Page {
            body,
            last_modified,
        })
    }
}

/// Parse an HTTP date header value (IMF-fixdate, RFC 2822 compatible).
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
