//! Feed building and RSS 2.0 serialization.
//!
//! [`build_feed`] maps a crawl's articles into a bounded [`FeedDocument`]
//! in input order; [`to_rss_xml`] serializes the document as UTF-8 RSS 2.0
//! with a `quick_xml` writer. The consuming web layer only has to set the
//! `application/rss+xml` content type.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::error::Error;

use crate::models::Article;
use crate::site;

/// Maximum number of items ever emitted in one built feed.
pub const MAX_ITEMS_PER_FEED: usize = 160;

/// Item content sentinel for articles whose abstract never materialized
/// (timed out, or the publication only has a PDF).
pub const MISSING_ABSTRACT: &str = "T/O or PDF";

/// Static descriptive fields of the feed.
#[derive(Debug, Clone)]
pub struct FeedIdentity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub copyright: String,
    pub generator: String,
    pub image_uri: String,
}

impl Default for FeedIdentity {
    fn default() -> Self {
        Self {
            id: site::SITE_ORIGIN.to_string(),
            title: "Google Research".to_string(),
            description: "Google Research Web2Feed".to_string(),
            copyright: "PUBLIC DOMAIN".to_string(),
            generator: "Google Research Web2Feed".to_string(),
            image_uri: format!("{}/favicon.ico", site::SITE_ORIGIN),
        }
    }
}

/// A built feed: identity fields, build time, and a bounded item list.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub copyright: String,
    pub generator: String,
    pub image_uri: String,
    /// Build time of this document.
    pub last_updated: DateTime<Utc>,
    pub items: Vec<FeedItem>,
}

/// One feed entry, derived 1:1 from an [`Article`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    /// Canonical URL string when the article has one, else the article id.
    pub id: String,
    pub title: Option<String>,
    /// Abstract text, or [`MISSING_ABSTRACT`] when absent.
    pub content: String,
    /// Canonical URL; omitted from the serialized item when absent.
    pub link: Option<String>,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Map articles into a [`FeedDocument`] in input order, stopping at the
/// feed-wide cap. Articles beyond the cap are dropped, not an error.
pub fn build_feed(articles: &[Article], identity: &FeedIdentity) -> FeedDocument {
    let now = Utc::now();
    let mut items = Vec::new();

    for article in articles {
        let link = article.canonical_uri.as_ref().map(|u| u.to_string());
        let when = article.last_updated.unwrap_or(now);
        items.push(FeedItem {
            id: link.clone().unwrap_or_else(|| article.id.clone()),
            title: article.title.clone(),
            content: article
                .abstract_text
                .clone()
                .unwrap_or_else(|| MISSING_ABSTRACT.to_string()),
            link,
            published_at: when,
            updated_at: when,
        });
        if items.len() >= MAX_ITEMS_PER_FEED {
            break;
        }
    }

    FeedDocument {
        id: identity.id.clone(),
        title: identity.title.clone(),
        description: identity.description.clone(),
        copyright: identity.copyright.clone(),
        generator: identity.generator.clone(),
        image_uri: identity.image_uri.clone(),
        last_updated: now,
        items,
    }
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Box<dyn Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Serialize the document as an RSS 2.0 XML string.
pub fn to_rss_xml(feed: &FeedDocument) -> Result<String, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &feed.title)?;
    text_element(&mut writer, "link", &feed.id)?;
    text_element(&mut writer, "description", &feed.description)?;
    text_element(&mut writer, "copyright", &feed.copyright)?;
    text_element(&mut writer, "generator", &feed.generator)?;
    text_element(&mut writer, "lastBuildDate", &feed.last_updated.to_rfc2822())?;

    writer.write_event(Event::Start(BytesStart::new("image")))?;
    text_element(&mut writer, "url", &feed.image_uri)?;
    text_element(&mut writer, "title", &feed.title)?;
    text_element(&mut writer, "link", &feed.id)?;
    writer.write_event(Event::End(BytesEnd::new("image")))?;

    for item in &feed.items {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        writer.write_event(Event::Start(guid))?;
        writer.write_event(Event::Text(BytesText::new(&item.id)))?;
        writer.write_event(Event::End(BytesEnd::new("guid")))?;

        if let Some(title) = &item.title {
            text_element(&mut writer, "title", title)?;
        }
        text_element(&mut writer, "description", &item.content)?;
        if let Some(link) = &item.link {
            text_element(&mut writer, "link", link)?;
        }
        text_element(&mut writer, "pubDate", &item.published_at.to_rfc2822())?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}
