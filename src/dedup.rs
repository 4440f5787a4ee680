//! Identifier-keyed duplicate suppression.
//!
//! The same publication routinely appears under several research areas, so
//! the crawl funnels every extracted article through one insert-only store.
//! The first article seen under an id wins; later sightings are dropped
//! silently. The store lives for a single crawl pass and is discarded once
//! the feed is built.

use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

use crate::models::Article;

/// Insert-only article store, keyed by article id, first-seen-wins.
///
/// Insertion order is preserved so the feed reflects crawl order. The
/// interior mutex keeps insertion safe should the orchestrator ever fan
/// out across areas with concurrent writers.
pub struct Deduplicator {
    inner: Mutex<Inner>,
}

struct Inner {
    seen: HashSet<String>,
    articles: Vec<Article>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                seen: HashSet::new(),
                articles: Vec::new(),
            }),
        }
    }

    /// Insert `article` unless its id was already seen.
    ///
    /// Returns `true` when inserted, `false` when the id was a repeat.
    pub fn try_insert(&self, article: Article) -> bool {
        let mut inner = self.inner.lock().expect("deduplicator lock poisoned");
        if inner.seen.insert(article.id.clone()) {
            inner.articles.push(article);
            true
        } else {
            debug!(id = %article.id, "Duplicate article dropped");
            false
        }
    }

    /// Number of unique articles collected so far.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("deduplicator lock poisoned").articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the store, yielding unique articles in insertion order.
    pub fn into_articles(self) -> Vec<Article> {
        self.inner
            .into_inner()
            .expect("deduplicator lock poisoned")
            .articles
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new()
    }
}
