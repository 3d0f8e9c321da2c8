//! Feed parsing into a format-neutral model.
//!
//! The podcast builders never see `rss` or `atom_syndication` types, only
//! [`RawFeed`] and [`RawFeedItem`]. RSS 2.0 is tried first, then Atom.
//!
//! | Module | Source format                                   |
//! |--------|-------------------------------------------------|
//! | `rss`  | RSS 2.0 with iTunes and Dublin Core extensions  |
//! | `atom` | Atom 1.0                                        |

mod atom;
mod rss;

use crate::utils::date::Timestamp;
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;

/// Feed-level fields of a parsed feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeed {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Raw feed-level publish date, as written in the feed.
    pub published: String,
    /// Cover image URL, if the feed declares one.
    pub image_url: Option<String>,
    /// Items in document order.
    pub items: Vec<RawFeedItem>,
}

/// One entry (episode) of a parsed feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeedItem {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Raw publish date, as written in the feed.
    pub published: String,
    /// `published` parsed, if it could be understood.
    pub published_parsed: Option<Timestamp>,
    /// `itunes:duration`, verbatim.
    pub duration: Option<String>,
}

/// Feed parsing errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("not an RSS or Atom document: {0}")]
    Unrecognized(String),
}

/// Parse an RSS or Atom document.
pub fn parse(bytes: &[u8]) -> Result<RawFeed, FeedError> {
    let rss_err = match self::rss::parse(bytes) {
        Ok(feed) => return Ok(feed),
        Err(e) => e,
    };
    self::atom::parse(bytes).map_err(|_| FeedError::Unrecognized(rss_err.to_string()))
}

/// Parse a cached feed file.
pub fn parse_file(path: &Path) -> Result<RawFeed, FeedError> {
    let bytes = fs::read(path).map_err(|err| FeedError::Io(path.to_path_buf(), err))?;
    parse(&bytes)
}

/// Treat empty strings as missing.
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
