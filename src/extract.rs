//! Turning one publication list item into an [`Article`].
//!
//! Extraction is purely structural: read the three class-marked anchors,
//! the title paragraph, and the remaining paragraphs, then derive the
//! identifier. Missing elements become absent fields; an unparseable href
//! is treated the same as a missing one. No network access happens here.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use sha2::{Digest, Sha256};
use tracing::trace;
use url::Url;

use crate::models::Article;
use crate::select;
use crate::site;

/// Trailing path pattern of an abstract URL; capture 1 is the article id.
static ARTICLE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"/([a-zA-Z0-9]*)\.html$").unwrap());

/// Extract an [`Article`] from one `ul.pub-list > li` subtree.
///
/// The returned article has no abstract text and no timestamp; both are
/// filled in later by enrichment or by the orchestrator's fallback.
pub fn extract_article(item: &ElementRef<'_>) -> Article {
    let search_url = select::first_href(item, &select::SEARCH_LINK).map(|h| site::absolutize(&h));
    let pdf_url = select::first_href(item, &select::PDF_LINK).map(|h| site::absolutize(&h));
    let abstract_url =
        select::first_href(item, &select::ABSTRACT_LINK).map(|h| site::absolutize(&h));

    let title = select::first_match(item, &select::TITLE_PARA)
        .map(|el| site::clean_text(&el.text().collect::<String>()).to_string());

    let appendix = item
        .select(&select::PARAGRAPHS)
        .filter(|el| !el.value().classes().any(|c| c == "pub-title"))
        .map(|el| site::clean_text(&el.text().collect::<String>()).to_string())
        .collect::<String>();

    let id = article_id(abstract_url.as_deref(), title.as_deref());

    let abstract_uri = abstract_url.as_deref().and_then(|u| Url::parse(u).ok());
    let pdf_uri = pdf_url.as_deref().and_then(|u| Url::parse(u).ok());
    let search_uri = search_url.as_deref().and_then(|u| Url::parse(u).ok());
    let canonical_uri = Article::resolve_canonical(&abstract_uri, &pdf_uri, &search_uri);

    trace!(%id, ?title, "Extracted article");
    Article {
        id,
        title,
        abstract_text: None,
        canonical_uri,
        abstract_uri,
        pdf_uri,
        search_uri,
        appendix,
        last_updated: None,
    }
}

/// Derive the article identifier.
///
/// The trailing `<id>.html` segment of the abstract URL wins; without a
/// match (or without an abstract URL) the id is the uppercase hex SHA-256
/// of the title, hashing the empty string when there is no title.
fn article_id(abstract_url: Option<&str>, title: Option<&str>) -> String {
    if let Some(url) = abstract_url {
        if let Some(captures) = ARTICLE_ID.captures(url) {
            return captures[1].to_string();
        }
    }
    sha256_hex(title.unwrap_or(""))
}

/// Uppercase hex SHA-256 digest of `input`.
fn sha256_hex(input: &str) -> String {
    Sha256::digest(input.as_bytes())
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect()
}
