//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing all pages for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!     <url>
//!         <loc>https://example.com/</loc>
//!         <lastmod>2025-01-01</lastmod>
//!     </url>
//! </urlset>
//! ```
//!
//! `lastmod` never goes below the configured floor date. The comparison is
//! textual, which is sound because both sides are `YYYY-MM-DD`.

use crate::{log, utils::date::{Timestamp, ZERO_DATE}};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Collected sitemap entries, rendered in insertion order.
#[derive(Debug)]
pub struct Sitemap {
    base: String,
    floor: String,
    urls: Vec<UrlEntry>,
}

#[derive(Debug)]
struct UrlEntry {
    url: String,
    timestamp: Option<Timestamp>,
}

impl Sitemap {
    /// `base` is prepended verbatim to every added URL; `floor` is a
    /// `YYYY-MM-DD` date.
    pub fn new(base: impl Into<String>, floor: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            floor: floor.into(),
            urls: Vec::new(),
        }
    }

    /// Add a site-relative URL. `None` means "no known modification time".
    pub fn add(&mut self, url: impl Into<String>, timestamp: Option<Timestamp>) {
        self.urls.push(UrlEntry {
            url: url.into(),
            timestamp,
        });
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// `lastmod` for an entry, floored at the configured minimum.
    fn lastmod(&self, timestamp: Option<&Timestamp>) -> String {
        let date = timestamp.map_or_else(|| ZERO_DATE.to_owned(), Timestamp::date);
        if date < self.floor {
            self.floor.clone()
        } else {
            date
        }
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 128);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in &self.urls {
            xml.push_str("    <url>\n        <loc>");
            xml.push_str(&escape_xml(&self.base));
            xml.push_str(&escape_xml(&entry.url));
            xml.push_str("</loc>\n        <lastmod>");
            xml.push_str(&self.lastmod(entry.timestamp.as_ref()));
            xml.push_str("</lastmod>\n    </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Render and write to `path`, creating parent directories.
    pub fn write(self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let count = self.len();
        fs::write(path, self.into_xml())
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{} ({} urls)", path.file_name().unwrap_or_default().to_string_lossy(), count);
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::{DateTime, parse_feed_date};
    use tempfile::TempDir;

    const BASE: &str = "https://lauf.example";
    const FLOOR: &str = "2023-09-07";

    fn ts(date: &str) -> Option<Timestamp> {
        parse_feed_date(date)
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap::new(BASE, FLOOR).into_xml();

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_floor_applies_to_older_entries() {
        let mut sitemap = Sitemap::new(BASE, FLOOR);
        sitemap.add("/old/", ts("2021-01-01"));
        let xml = sitemap.into_xml();

        assert!(xml.contains("<lastmod>2023-09-07</lastmod>"));
        assert!(!xml.contains("2021-01-01"));
    }

    #[test]
    fn test_newer_entries_keep_their_date() {
        let mut sitemap = Sitemap::new(BASE, FLOOR);
        sitemap.add("/new/", ts("Mon, 02 Oct 2023 06:00:00 +0200"));
        sitemap.add("/same/", Some(Timestamp::utc(DateTime::from_ymd(2023, 9, 7))));
        let xml = sitemap.into_xml();

        assert!(xml.contains("<lastmod>2023-10-02</lastmod>"));
        assert_eq!(xml.matches("<lastmod>2023-09-07</lastmod>").count(), 1);
    }

    #[test]
    fn test_missing_timestamp_uses_floor() {
        let mut sitemap = Sitemap::new(BASE, FLOOR);
        sitemap.add("/unknown/", None);
        let xml = sitemap.into_xml();

        assert!(xml.contains("<lastmod>2023-09-07</lastmod>"));
        assert!(!xml.contains(ZERO_DATE));
    }

    #[test]
    fn test_insertion_order_and_layout() {
        let mut sitemap = Sitemap::new(BASE, FLOOR);
        sitemap.add("/", ts("2023-10-05"));
        sitemap.add("/b/", ts("2023-10-01"));
        sitemap.add("/a/", ts("2023-10-09"));
        let xml = sitemap.into_xml();

        let b = xml.find("/b/").unwrap();
        let a = xml.find("/a/").unwrap();
        assert!(b < a);

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lines[2], "    <url>");
        assert_eq!(lines[3], "        <loc>https://lauf.example/</loc>");
        assert_eq!(lines[4], "        <lastmod>2023-10-05</lastmod>");
        assert_eq!(lines[5], "    </url>");
        assert_eq!(*lines.last().unwrap(), "</urlset>");
    }

    #[test]
    fn test_loc_is_escaped() {
        let mut sitemap = Sitemap::new(BASE, FLOOR);
        sitemap.add("/search?q=a&b=c", None);
        let xml = sitemap.into_xml();

        assert!(xml.contains("<loc>https://lauf.example/search?q=a&amp;b=c</loc>"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("sitemap.xml");
        let mut sitemap = Sitemap::new(BASE, FLOOR);
        sitemap.add("/", ts("2023-10-05"));
        sitemap.write(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<loc>https://lauf.example/</loc>"));
    }
}
