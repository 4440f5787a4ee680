//! Error types for the crawl pipeline.
//!
//! All fallible network operations return [`FetchError`]. Parse misses are
//! never errors: every extracted field is optional and absence is a valid
//! outcome of the source site's variable layout.

use reqwest::StatusCode;

/// A transport-level failure: the request could not be made, timed out,
/// or came back with a non-success status.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed outright (DNS, connection, timeout, bad body).
    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FetchError>;
