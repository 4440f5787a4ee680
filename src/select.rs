//! Structural queries against parsed markup.
//!
//! Thin, pure helpers over [`scraper`]: find area links on the root listing,
//! publication items on an area page, and class-marked elements inside an
//! item. Nothing here fails on unexpected markup — when a selector matches
//! nothing the result is simply empty or `None`, reflecting the source
//! site's variable layout.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::site;

/// Anchors on the root listing that title each research area.
static AREA_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.research-area-title").unwrap());

/// List items of an area's publication list.
static LIST_ITEMS: Lazy<Selector> = Lazy::new(|| Selector::parse("ul.pub-list > li").unwrap());

/// Search-result anchor inside a publication item.
pub static SEARCH_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a.search-icon").unwrap());

/// PDF anchor inside a publication item.
pub static PDF_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a.pdf-icon").unwrap());

/// Abstract-page anchor inside a publication item.
pub static ABSTRACT_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.abstract-icon").unwrap());

/// Title paragraph of a publication item.
pub static TITLE_PARA: Lazy<Selector> = Lazy::new(|| Selector::parse("p.pub-title").unwrap());

/// All paragraphs of a publication item; the title one is filtered out
/// when building the appendix.
pub static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Free-text abstract container on an abstract page.
pub static ABSTRACT_BLOCK: Lazy<Selector> = Lazy::new(|| Selector::parse("div.abstract").unwrap());

/// Collect the research-area URLs from the root listing page, absolutized
/// against the site origin.
pub fn area_links(doc: &Html) -> Vec<String> {
    doc.select(&AREA_LINKS)
        .filter_map(|el| el.value().attr("href"))
        .map(site::absolutize)
        .collect()
}

/// Collect the publication list items of an area page, in document order.
pub fn list_items(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&LIST_ITEMS).collect()
}

/// First element under `node` matching `selector`, if any.
pub fn first_match<'a>(node: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    node.select(selector).next()
}

/// The `href` of the first anchor under `node` matching `selector`.
pub fn first_href(node: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    first_match(node, selector)
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)
}
