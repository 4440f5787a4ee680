//! Constants and text rules for the crawled site.
//!
//! The crawl targets the Google Research publications listing. Hrefs on the
//! site are usually relative to the origin; [`absolutize`] rewrites them.

/// Origin of the crawled site. Also used as the feed id.
pub const SITE_ORIGIN: &str = "https://research.google.com";

/// Path of the root listing page that links every research area.
pub const CRAWL_ROOT: &str = "/pubs/papers.html";

/// Characters stripped from both ends of extracted text blocks.
pub const TRIM_CHARS: &[char] = &['"', ' ', '\r', '\n'];

/// Rewrite a relative href to an absolute URL on the site origin.
///
/// Anything that already starts with an HTTP scheme (case-insensitive) is
/// returned as-is.
pub fn absolutize(href: &str) -> String {
    if href.to_ascii_lowercase().starts_with("http") {
        href.to_string()
    } else {
        format!("{SITE_ORIGIN}{href}")
    }
}

/// Trim quotes, spaces, and newlines from both ends of a text block.
pub fn clean_text(text: &str) -> &str {
    text.trim_matches(TRIM_CHARS)
}
