//! Single-slot feed cache with a TTL window.
//!
//! [`FeedCache::get`] is the one call the web layer consumes. Within the
//! TTL it returns the cached [`FeedDocument`] without touching the network;
//! on a miss it runs a full crawl, rebuilds the feed, and replaces the slot
//! wholesale. The slot lock is held across a rebuild, so concurrent misses
//! wait for one rebuild instead of each recrawling.
//!
//! A rebuild failure is fail-soft: with a prior document in the slot it is
//! logged and the stale feed is served again; only a cold start with an
//! unreachable source surfaces the error.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::crawl::Crawler;
use crate::error::Result;
use crate::feed::{self, FeedDocument, FeedIdentity};
use crate::fetch::Fetch;

/// Default cache lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct Cached {
    doc: Arc<FeedDocument>,
    built_at: Instant,
}

/// Process-lifetime cache slot in front of the crawl pipeline.
pub struct FeedCache<F: Fetch> {
    crawler: Crawler<F>,
    identity: FeedIdentity,
    ttl: Duration,
    slot: Mutex<Option<Cached>>,
}

impl<F: Fetch> FeedCache<F> {
    /// Cache with the default one-hour TTL.
    pub fn new(crawler: Crawler<F>, identity: FeedIdentity) -> Self {
        Self::with_ttl(crawler, identity, DEFAULT_TTL)
    }

    pub fn with_ttl(crawler: Crawler<F>, identity: FeedIdentity, ttl: Duration) -> Self {
        Self {
            crawler,
            identity,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the current feed, rebuilding when the cache is bypassed,
    /// empty, or older than the TTL.
    #[instrument(level = "info", skip(self))]
    pub async fn get(&self, use_cache: bool) -> Result<Arc<FeedDocument>> {
        let mut slot = self.slot.lock().await;

        if use_cache {
            if let Some(cached) = slot.as_ref() {
                if cached.built_at.elapsed() < self.ttl {
                    debug!("Serving cached feed");
                    return Ok(Arc::clone(&cached.doc));
                }
            }
        }

        match self.rebuild().await {
            Ok(doc) => {
                let doc = Arc::new(doc);
                *slot = Some(Cached {
                    doc: Arc::clone(&doc),
                    built_at: Instant::now(),
                });
                info!(items = doc.items.len(), "Feed rebuilt");
                Ok(doc)
            }
            Err(e) => match slot.as_ref() {
                Some(cached) => {
                    warn!(error = %e, "Feed rebuild failed; serving stale cached feed");
                    Ok(Arc::clone(&cached.doc))
                }
                None => {
                    error!(error = %e, "Feed rebuild failed with no cached feed to fall back on");
                    Err(e)
                }
            },
        }
    }

    /// Drop the cached document; the next [`get`](Self::get) rebuilds.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }

    async fn rebuild(&self) -> Result<FeedDocument> {
        let articles = self.crawler.crawl().await?;
        Ok(feed::build_feed(&articles, &self.identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::MISSING_ABSTRACT;
    use crate::testutil::FakeFetcher;

    const ROOT: &str = "https://research.google.com/pubs/papers.html";
    const AREA: &str = "https://research.google.com/pubs/ml.html";

    /// Root with one area holding one plain item.
    fn small_site() -> FakeFetcher {
        FakeFetcher::new()
            .with_page(
                ROOT,
                r#"<html><body><a class="research-area-title" href="/pubs/ml.html">ML</a></body></html>"#,
            )
            .with_page(
                AREA,
                r#"<html><body><ul class="pub-list">
                     <li><p class="pub-title">Only Paper</p></li>
                   </ul></body></html>"#,
            )
    }

    fn cache_over(fetcher: Arc<FakeFetcher>, ttl: Duration) -> FeedCache<Arc<FakeFetcher>> {
        FeedCache::with_ttl(Crawler::new(fetcher), FeedIdentity::default(), ttl)
    }

    #[tokio::test]
    async fn second_get_within_ttl_is_served_from_cache() {
        let fetcher = Arc::new(small_site());
        let cache = cache_over(Arc::clone(&fetcher), Duration::from_secs(3600));

        let first = cache.get(true).await.unwrap();
        // Root + area, no abstracts.
        assert_eq!(fetcher.calls(), 2);
        let second = cache.get(true).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn elapsed_ttl_triggers_exactly_one_rebuild() {
        let fetcher = Arc::new(small_site());
        let cache = cache_over(Arc::clone(&fetcher), Duration::ZERO);

        let first = cache.get(true).await.unwrap();
        assert_eq!(fetcher.calls(), 2);
        let second = cache.get(true).await.unwrap();
        assert_eq!(fetcher.calls(), 4);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn use_cache_false_bypasses_fresh_cache() {
        let fetcher = Arc::new(small_site());
        let cache = cache_over(Arc::clone(&fetcher), Duration::from_secs(3600));
        cache.get(true).await.unwrap();
        cache.get(false).await.unwrap();
        assert_eq!(fetcher.calls(), 4);
    }

    #[tokio::test]
    async fn invalidate_forces_rebuild() {
        let fetcher = Arc::new(small_site());
        let cache = cache_over(Arc::clone(&fetcher), Duration::from_secs(3600));
        cache.get(true).await.unwrap();
        cache.invalidate().await;
        cache.get(true).await.unwrap();
        assert_eq!(fetcher.calls(), 4);
    }

    #[tokio::test]
    async fn rebuild_failure_serves_stale_feed() {
        // First pass succeeds (2 fetches), then the site goes down.
        let fetcher = Arc::new(small_site().fail_after(2));
        let cache = cache_over(fetcher, Duration::ZERO);

        let first = cache.get(true).await.unwrap();
        let second = cache.get(true).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn cold_start_with_unreachable_site_surfaces_error() {
        let fetcher = Arc::new(FakeFetcher::new().with_failure(ROOT));
        let cache = cache_over(fetcher, Duration::ZERO);
        assert!(cache.get(true).await.is_err());
    }

    #[tokio::test]
    async fn pipeline_keeps_unidentifiable_item_with_placeholder() {
        // One item with no links and no title: its id is the SHA-256 of
        // the empty string and it still shows up in the feed.
        let fetcher = FakeFetcher::new()
            .with_page(
                ROOT,
                r#"<html><body><a class="research-area-title" href="/pubs/ml.html">ML</a></body></html>"#,
            )
            .with_page(
                AREA,
                r#"<html><body><ul class="pub-list"><li><span>stub entry</span></li></ul></body></html>"#,
            );
        let cache = cache_over(Arc::new(fetcher), Duration::from_secs(3600));

        let doc = cache.get(true).await.unwrap();
        assert_eq!(doc.items.len(), 1);
        assert_eq!(
            doc.items[0].id,
            "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
        );
        assert_eq!(doc.items[0].content, MISSING_ABSTRACT);
        assert!(doc.items[0].link.is_none());
    }
}
