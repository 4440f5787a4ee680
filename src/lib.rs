//! # pubfeed
//!
//! Crawls the Google Research publications site and republishes it as an
//! RSS feed with a small time-bounded cache.
//!
//! ## Architecture
//!
//! The crate is a pipeline:
//! 1. **Crawl**: discover research-area pages from the root listing, walk
//!    each area's publication list (capped per area)
//! 2. **Extract**: turn each list item into an [`Article`](models::Article),
//!    resolving link priority and deriving a stable identifier
//! 3. **Enrich**: fetch each article's abstract page for abstract text and
//!    a last-modified timestamp
//! 4. **Deduplicate**: drop repeat identifiers, first-seen wins
//! 5. **Render**: map the surviving articles into a bounded
//!    [`FeedDocument`](feed::FeedDocument) and serialize it as RSS 2.0
//!
//! The whole pipeline sits behind [`FeedCache::get`](cache::FeedCache::get),
//! which serves a cached feed inside a TTL window and rebuilds otherwise.
//! A rebuild failure falls back to the previously cached feed when one
//! exists; serving a stale feed beats serving none.
//!
//! Network access goes through the [`Fetch`](fetch::Fetch) trait so the
//! crawl logic stays independent of the HTTP client (and testable against
//! canned pages).

pub mod cache;
pub mod crawl;
pub mod dedup;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod feed;
pub mod fetch;
pub mod models;
pub mod select;
pub mod site;

#[cfg(test)]
pub(crate) mod testutil;

pub use cache::FeedCache;
pub use crawl::Crawler;
pub use error::FetchError;
pub use feed::{FeedDocument, FeedIdentity, FeedItem};
pub use fetch::{Fetch, HttpFetcher, Page};
pub use models::Article;
