//! Data model for crawled publications.
//!
//! One [`Article`] is produced per publication-list item during a crawl
//! pass. Articles live only for the duration of a pass: they are collected,
//! deduplicated, rendered into a feed, and discarded.

use chrono::{DateTime, Utc};
use url::Url;

/// A single publication as extracted from an area's listing page.
///
/// Every field except `id` and `appendix` is optional — the source site's
/// layout varies and a missing element is a valid outcome, never an error.
///
/// # Identifier
///
/// `id` is derived deterministically from the abstract URL when its trailing
/// path segment matches the site's `<id>.html` pattern; otherwise it is the
/// uppercase hex SHA-256 of the title (or of the empty string when the item
/// has no title). Every article therefore carries a non-empty id even when
/// it has no identifying URL at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Stable identifier; unique key during deduplication.
    pub id: String,
    /// Publication title, trimmed of quotes and whitespace.
    pub title: Option<String>,
    /// Abstract text fetched from the abstract page.
    pub abstract_text: Option<String>,
    /// The link used for feed display: abstract, else PDF, else search.
    pub canonical_uri: Option<Url>,
    /// Link to the abstract page, absolutized.
    pub abstract_uri: Option<Url>,
    /// Link to the PDF, absolutized.
    pub pdf_uri: Option<Url>,
    /// Link to a search result for the publication, absolutized.
    pub search_uri: Option<Url>,
    /// Concatenation of all non-title text blocks in the listing item.
    pub appendix: String,
    /// Last-modified time of the abstract page, or the crawl's rolling
    /// fallback timestamp when no abstract page was reachable.
    pub last_updated: Option<DateTime<Utc>>,
}

impl Article {
    /// Pick the canonical display link by priority:
    /// abstract, else PDF, else search, else none.
    pub fn resolve_canonical(
        abstract_uri: &Option<Url>,
        pdf_uri: &Option<Url>,
        search_uri: &Option<Url>,
    ) -> Option<Url> {
        if let Some(u) = abstract_uri {
            Some(u.clone())
        } else if let Some(u) = pdf_uri {
            Some(u.clone())
        } else if let Some(u) = search_uri {
            Some(u.clone())
        } else {
            None
        }
    }
}
