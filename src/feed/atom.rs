//! Atom 1.0 mapping.

use super::{RawFeed, RawFeedItem, non_empty};
use crate::utils::date::Timestamp;
use atom_syndication::{Entry, Feed, FixedDateTime, Link};

pub(super) fn parse(bytes: &[u8]) -> Result<RawFeed, atom_syndication::Error> {
    Feed::read_from(bytes).map(|feed| from_feed(&feed))
}

fn from_feed(feed: &Feed) -> RawFeed {
    RawFeed {
        title: feed.title().value.clone(),
        description: feed
            .subtitle()
            .map(|text| text.value.clone())
            .unwrap_or_default(),
        link: alternate_link(feed.links()).to_owned(),
        published: feed.updated().to_rfc3339(),
        image_url: non_empty(feed.logo())
            .or_else(|| non_empty(feed.icon()))
            .map(str::to_owned),
        items: feed.entries().iter().map(from_entry).collect(),
    }
}

fn from_entry(entry: &Entry) -> RawFeedItem {
    let description = entry
        .summary()
        .map(|text| text.value.as_str())
        .or_else(|| entry.content().and_then(|content| content.value()))
        .unwrap_or_default();
    let published = entry.published().unwrap_or_else(|| entry.updated());

    RawFeedItem {
        title: entry.title().value.clone(),
        description: description.to_owned(),
        link: alternate_link(entry.links()).to_owned(),
        published: published.to_rfc3339(),
        published_parsed: Some(timestamp(published)),
        duration: None,
    }
}

fn timestamp(date: &FixedDateTime) -> Timestamp {
    Timestamp::from_unix(date.timestamp(), date.offset().local_minus_utc())
}

/// The `alternate` link, or the first link when none is marked.
fn alternate_link(links: &[Link]) -> &str {
    links
        .iter()
        .find(|link| link.rel() == "alternate")
        .or_else(|| links.first())
        .map(Link::href)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATOM_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Trail Talk</title>
  <subtitle>Gespräche vom Trail</subtitle>
  <link rel="self" href="https://trail.example/feed.atom"/>
  <link rel="alternate" href="https://trail.example/"/>
  <id>urn:uuid:trail</id>
  <updated>2023-10-03T08:00:00+02:00</updated>
  <logo>https://trail.example/logo.jpg</logo>
  <entry>
    <title>Ultra</title>
    <link href="https://trail.example/ultra"/>
    <id>urn:uuid:ultra</id>
    <published>2023-10-01T10:00:00+02:00</published>
    <updated>2023-10-02T10:00:00+02:00</updated>
    <summary>Lang *und* [weit](https://trail.example)</summary>
  </entry>
  <entry>
    <title>Kurz</title>
    <id>urn:uuid:kurz</id>
    <updated>2023-09-01T10:00:00Z</updated>
    <content type="html">&lt;p&gt;kurz&lt;/p&gt;</content>
  </entry>
</feed>"#;

    #[test]
    fn test_feed_fields() {
        let feed = parse(ATOM_XML.as_bytes()).unwrap();
        assert_eq!(feed.title, "Trail Talk");
        assert_eq!(feed.description, "Gespräche vom Trail");
        assert_eq!(feed.link, "https://trail.example/");
        assert_eq!(feed.image_url.as_deref(), Some("https://trail.example/logo.jpg"));
        assert_eq!(feed.items.len(), 2);
    }

    #[test]
    fn test_entry_prefers_published_and_summary() {
        let feed = parse(ATOM_XML.as_bytes()).unwrap();
        let entry = &feed.items[0];
        assert_eq!(entry.link, "https://trail.example/ultra");
        assert_eq!(entry.description, "Lang *und* [weit](https://trail.example)");
        let published = entry.published_parsed.unwrap();
        assert_eq!(published.date(), "2023-10-01");
        assert_eq!(published.to_string(), "2023-10-01T10:00:00+02:00");
        assert_eq!(entry.published, "2023-10-01T10:00:00+02:00");
        assert_eq!(entry.duration, None);
    }

    #[test]
    fn test_entry_falls_back_to_updated_and_content() {
        let feed = parse(ATOM_XML.as_bytes()).unwrap();
        let entry = &feed.items[1];
        assert_eq!(entry.description, "<p>kurz</p>");
        assert_eq!(entry.published_parsed.unwrap().date(), "2023-09-01");
        assert_eq!(entry.link, "");
    }
}
