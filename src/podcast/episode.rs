//! Episode model.

use super::{
    clean::clean_description,
    duration::normalize_duration,
    render::{RenderOptions, render_html},
};
use crate::feed::RawFeedItem;
use crate::utils::{date::Timestamp, html::SafeHtml};
use serde::Serialize;

/// Shown when a feed item carries no duration.
pub const UNKNOWN_DURATION: &str = "unbekannt";

/// One episode, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    pub title: String,
    pub description: SafeHtml,
    /// `None` when the feed date could not be parsed.
    pub published: Option<Timestamp>,
    /// `YYYY-MM-DD`, or the raw feed date if unparseable.
    pub published_display: String,
    pub link: String,
    pub duration: String,
}

impl Episode {
    /// Build an episode from a feed item. Missing fields fall back to
    /// defaults, so this never fails.
    pub fn from_item(item: &RawFeedItem, options: RenderOptions) -> Self {
        let (published, published_display) = match item.published_parsed {
            Some(ts) => (Some(ts), ts.date()),
            None => (None, item.published.clone()),
        };
        let duration = item.duration.as_deref().unwrap_or(UNKNOWN_DURATION);

        Self {
            title: item.title.clone(),
            description: render_html(&clean_description(&item.description), options),
            published,
            published_display,
            link: item.link.clone(),
            duration: normalize_duration(duration),
        }
    }
}
