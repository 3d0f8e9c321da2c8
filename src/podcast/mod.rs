//! Podcast and episode model built from parsed feeds.
//!
//! # Module Structure
//!
//! | Module     | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `clean`    | Strip hosting-platform boilerplate             |
//! | `render`   | HTML / Markdown / plain-text detection, render |
//! | `duration` | Seconds to `H:MM:SS`                           |
//! | `episode`  | `Episode` from one feed item                   |
//!
//! Everything here is a pure transformation of already-fetched data.

mod clean;
mod duration;
mod episode;
mod render;

pub use episode::Episode;
pub use render::RenderOptions;

use crate::feed::RawFeed;
use crate::utils::{date::Timestamp, html::SafeHtml, url::is_same_site};
use clean::clean_description;
use render::render_html;
use serde::Serialize;

/// One podcast with all episodes of its feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Podcast {
    pub slug: String,
    pub title: String,
    pub description: SafeHtml,
    pub feed_url: String,
    pub website_url: String,
    /// The feed's own link, when it points to a different site than
    /// the configured website.
    pub secondary_website_url: Option<String>,
    pub image_url: Option<String>,
    /// Feed order, newest first by convention. Never re-sorted.
    pub episodes: Vec<Episode>,
    pub latest_publish: Option<Timestamp>,
    pub latest_publish_display: String,
}

impl Podcast {
    /// Build a podcast from a parsed feed.
    ///
    /// `website_hint` is the externally configured website; the feed's own
    /// link is used when it is missing.
    pub fn from_feed(
        slug: &str,
        feed_url: &str,
        website_hint: Option<&str>,
        feed: &RawFeed,
        options: RenderOptions,
    ) -> Self {
        let episodes: Vec<Episode> = feed
            .items
            .iter()
            .map(|item| Episode::from_item(item, options))
            .collect();

        let (latest_publish, latest_publish_display) = match episodes.first() {
            Some(latest) => (latest.published, latest.published_display.clone()),
            None => (None, feed.published.clone()),
        };

        let (website_url, secondary_website_url) = resolve_website(website_hint, &feed.link);

        Self {
            slug: slug.to_owned(),
            title: feed.title.clone(),
            description: render_html(&clean_description(&feed.description), options),
            feed_url: feed_url.to_owned(),
            website_url,
            secondary_website_url,
            image_url: feed.image_url.clone(),
            episodes,
            latest_publish,
            latest_publish_display,
        }
    }

    /// The feed's first item, trusted to be the newest.
    pub fn latest_episode(&self) -> Option<&Episode> {
        self.episodes.first()
    }
}

/// Pick the primary website and, if the feed disagrees, a secondary one.
fn resolve_website(hint: Option<&str>, feed_link: &str) -> (String, Option<String>) {
    match hint.filter(|h| !h.is_empty()) {
        None => (feed_link.to_owned(), None),
        Some(hint) if !feed_link.is_empty() && !is_same_site(hint, feed_link) => {
            (hint.to_owned(), Some(feed_link.to_owned()))
        }
        Some(hint) => (hint.to_owned(), None),
    }
}

/// Sort podcasts newest first by `latest_publish`.
///
/// The sort is stable, so podcasts with equal timestamps keep their input
/// order; podcasts without a timestamp go last.
pub fn sort_by_recency(podcasts: &mut [Podcast]) {
    podcasts.sort_by(|a, b| b.latest_publish.cmp(&a.latest_publish));
}
