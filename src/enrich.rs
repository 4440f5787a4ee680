//! Abstract-page enrichment.
//!
//! Given an article that links to an abstract page, fetch that page and
//! fill in the abstract text plus the transport-level last-modified
//! timestamp. A failed fetch degrades only this one article — it keeps no
//! abstract and no timestamp — and never aborts the surrounding crawl.

use scraper::Html;
use tracing::{debug, warn};

use crate::fetch::Fetch;
use crate::models::Article;
use crate::select;
use crate::site;

/// Fetch the article's canonical page and fill `abstract_text` and
/// `last_updated`. A fetch failure is logged and leaves the article
/// unchanged.
pub async fn add_abstract<F: Fetch>(fetcher: &F, article: &mut Article) {
    let Some(url) = article.canonical_uri.as_ref().map(|u| u.to_string()) else {
        return;
    };

    let page = match fetcher.fetch(&url).await {
        Ok(page) => page,
        Err(e) => {
            warn!(id = %article.id, %url, error = %e, "Abstract fetch failed; article kept without abstract");
            return;
        }
    };

    article.last_updated = page.last_modified;

    let doc = Html::parse_document(&page.body);
    article.abstract_text = select::first_match(&doc.root_element(), &select::ABSTRACT_BLOCK)
        .map(|el| site::clean_text(&el.text().collect::<String>()).to_string());

    debug!(
        id = %article.id,
        has_abstract = article.abstract_text.is_some(),
        ?article.last_updated,
        "Enriched article from abstract page"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeFetcher;
    use chrono::{TimeZone, Utc};
    use url::Url;

    fn article_with_abstract(url: &str) -> Article {
        let uri = Url::parse(url).unwrap();
        Article {
            id: "pub1".to_string(),
            title: Some("Title".to_string()),
            abstract_text: None,
            canonical_uri: Some(uri.clone()),
            abstract_uri: Some(uri),
            pdf_uri: None,
            search_uri: None,
            appendix: String::new(),
            last_updated: None,
        }
    }

    #[tokio::test]
    async fn fills_abstract_and_timestamp() {
        let url = "https://research.google.com/pubs/pub1.html";
        let modified = Utc.with_ymd_and_hms(2017, 6, 12, 9, 30, 0).unwrap();
        let fetcher = FakeFetcher::new().with_page_modified(
            url,
            r#"<html><body><div class="abstract">  "We study things."  </div>
               <div class="abstract">second block ignored</div></body></html>"#,
            modified,
        );

        let mut article = article_with_abstract(url);
        add_abstract(&fetcher, &mut article).await;

        assert_eq!(article.abstract_text.as_deref(), Some("We study things."));
        assert_eq!(article.last_updated, Some(modified));
    }

    #[tokio::test]
    async fn fetch_failure_leaves_article_unchanged() {
        let url = "https://research.google.com/pubs/pub1.html";
        let fetcher = FakeFetcher::new().with_failure(url);

        let mut article = article_with_abstract(url);
        let before = article.clone();
        add_abstract(&fetcher, &mut article).await;

        assert_eq!(article, before);
        assert!(article.last_updated.is_none());
    }

    #[tokio::test]
    async fn missing_abstract_block_is_absent_not_error() {
        let url = "https://research.google.com/pubs/pub1.html";
        let modified = Utc.with_ymd_and_hms(2017, 6, 12, 9, 30, 0).unwrap();
        let fetcher = FakeFetcher::new().with_page_modified(
            url,
            "<html><body><p>no abstract container here</p></body></html>",
            modified,
        );

        let mut article = article_with_abstract(url);
        add_abstract(&fetcher, &mut article).await;

        assert!(article.abstract_text.is_none());
        assert_eq!(article.last_updated, Some(modified));
    }

    #[tokio::test]
    async fn no_canonical_url_is_a_no_op() {
        let fetcher = FakeFetcher::new();
        let mut article = article_with_abstract("https://research.google.com/pubs/pub1.html");
        article.canonical_uri = None;
        add_abstract(&fetcher, &mut article).await;
        assert_eq!(fetcher.calls(), 0);
    }
}
