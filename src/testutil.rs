//! Test-only fetcher serving canned pages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{FetchError, Result};
use crate::fetch::{Fetch, Page};

/// In-memory [`Fetch`] implementation: canned bodies per URL, injectable
/// failures, and a call counter for cache assertions. Unknown URLs come
/// back as 404s.
pub struct FakeFetcher {
    pages: HashMap<String, Page>,
    failures: HashSet<String>,
    fail_after: Option<usize>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            failures: HashSet::new(),
            fail_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Serve `body` at `url` with no Last-Modified header.
    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            Page {
                body: body.to_string(),
                last_modified: None,
            },
        );
        self
    }

    /// Serve `body` at `url` with a Last-Modified timestamp.
    pub fn with_page_modified(mut self, url: &str, body: &str, modified: DateTime<Utc>) -> Self {
        self.pages.insert(
            url.to_string(),
            Page {
                body: body.to_string(),
                last_modified: Some(modified),
            },
        );
        self
    }

    /// Make every fetch of `url` fail, simulating a timeout.
    pub fn with_failure(mut self, url: &str) -> Self {
        self.failures.insert(url.to_string());
        self
    }

    /// Fail every fetch after the first `n` calls, simulating a source
    /// site that goes down between crawl passes.
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Number of fetches performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Page> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| n >= limit) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        if self.failures.contains(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: StatusCode::REQUEST_TIMEOUT,
            });
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            })
    }
}
