//! Podcast aggregation shared by `build` and `query`.
//!
//! Entries are checked sequentially (slug, feed URL, duplicates), then
//! feeds are fetched and parsed in parallel. A failing feed only drops its
//! own podcast.

use crate::{
    config::{PodcastEntry, SiteConfig},
    debug,
    fetch::download_if_outdated,
    feed, log,
    logger::ProgressLine,
    podcast::{Podcast, sort_by_recency},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

/// A podcast entry that passed the checks, with its slug.
#[derive(Debug)]
pub struct FeedJob<'a> {
    pub entry: &'a PodcastEntry,
    pub slug: String,
}

/// Keep the entries that can be fetched, in config order.
///
/// Skipped (and logged): empty slug, empty feed URL, and any later entry
/// whose slug was already taken.
pub fn select_entries(entries: &[PodcastEntry]) -> Vec<FeedJob<'_>> {
    let mut seen = FxHashSet::default();
    let mut jobs = Vec::with_capacity(entries.len());

    for entry in entries {
        let slug = entry.slug();
        if slug.is_empty() {
            log!("skip"; "podcast '{}': sanitized name is empty", entry.name);
            continue;
        }
        if entry.feed.trim().is_empty() {
            log!("skip"; "podcast '{}': feed url is empty", entry.name);
            continue;
        }
        if !seen.insert(slug.clone()) {
            log!("skip"; "podcast '{}': slug '{}' is already used", entry.name, slug);
            continue;
        }
        jobs.push(FeedJob { entry, slug });
    }
    jobs
}

/// Fetch, parse and build the podcast of every job, sorted newest first.
pub fn fetch_podcasts(
    config: &SiteConfig,
    jobs: &[FeedJob<'_>],
    progress: Option<&ProgressLine>,
) -> Vec<Podcast> {
    let mut podcasts: Vec<Podcast> = jobs
        .par_iter()
        .filter_map(|job| {
            let result = load_podcast(job, config);
            if let Some(p) = progress {
                p.inc("feeds");
            }
            match result {
                Ok(podcast) => Some(podcast),
                Err(e) => {
                    log!("feed"; "podcast '{}': {:#}", job.entry.name, e);
                    None
                }
            }
        })
        .collect();

    sort_by_recency(&mut podcasts);
    podcasts
}

fn load_podcast(job: &FeedJob<'_>, config: &SiteConfig) -> Result<Podcast> {
    let entry = job.entry;
    let cache_file = config.build.cache.join(format!("{}.feed", job.slug));

    download_if_outdated(&entry.feed, &cache_file, &config.fetch_policy())
        .with_context(|| format!("failed to download '{}'", entry.feed))?;
    let raw = feed::parse_file(&cache_file)
        .with_context(|| format!("failed to parse feed '{}'", cache_file.display()))?;

    debug!("feed"; "{}: {} items", job.slug, raw.items.len());
    Ok(Podcast::from_feed(
        &job.slug,
        &entry.feed,
        entry.website(),
        &raw,
        config.render_options(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    fn entry(name: &str, feed: &str) -> PodcastEntry {
        PodcastEntry {
            name: name.into(),
            feed: feed.into(),
            website: None,
        }
    }

    fn rss(title: &str, date: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
<title>{title}</title><link>https://{title}.example</link><description>d</description>
<item><title>Folge 1</title><pubDate>{date}</pubDate><description>Hallo</description></item>
</channel></rss>"#
        )
    }

    #[test]
    fn test_select_entries_skips_invalid_and_duplicates() {
        let entries = [
            entry("Lauf-Talk", "https://a.example/feed"),
            entry("???", "https://b.example/feed"),
            entry("Ohne Feed", " "),
            entry("lauf talk", "https://c.example/feed"),
            entry("Zweiter", "https://d.example/feed"),
        ];
        let jobs = select_entries(&entries);
        let slugs: Vec<&str> = jobs.iter().map(|j| j.slug.as_str()).collect();
        assert_eq!(slugs, ["lauf-talk", "zweiter"]);
        assert_eq!(jobs[0].entry.feed, "https://a.example/feed");
    }

    #[test]
    fn test_fetch_podcasts_from_cache() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config(
            r#"
[[podcasts]]
name = "Alt"
feed = "https://alt.example/feed"

[[podcasts]]
name = "Neu"
feed = "https://neu.example/feed"
website = "https://neu.example"

[[podcasts]]
name = "Kaputt"
feed = "https://kaputt.example/feed"

[[podcasts]]
name = "Fehlt"
feed = "https://fehlt.example/feed"
"#,
        );
        config.build.cache = dir.path().to_path_buf();
        config.build.offline = true;

        fs::write(dir.path().join("alt.feed"), rss("alt", "Mon, 02 Oct 2023 06:00:00 +0200")).unwrap();
        fs::write(dir.path().join("neu.feed"), rss("neu", "Mon, 09 Oct 2023 06:00:00 +0200")).unwrap();
        fs::write(dir.path().join("kaputt.feed"), "not a feed").unwrap();

        let jobs = select_entries(&config.podcasts);
        let podcasts = fetch_podcasts(&config, &jobs, None);
        let slugs: Vec<&str> = podcasts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["neu", "alt"]);
        assert_eq!(podcasts[0].website_url, "https://neu.example");
        assert_eq!(podcasts[1].website_url, "https://alt.example");
        assert_eq!(podcasts[0].feed_url, "https://neu.example/feed");
    }
}
