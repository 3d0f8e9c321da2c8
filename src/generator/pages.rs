//! Site output: index, static pages, one page per podcast, sitemap.
//!
//! # Output Layout
//!
//! ```text
//! <output>/
//! ├── index.html
//! ├── <page>.html        # one per [[pages]] entry
//! ├── <slug>/index.html  # one per podcast
//! └── sitemap.xml
//! ```

use super::{sitemap::Sitemap, templates::TemplateCache};
use crate::{
    config::SiteConfig,
    debug,
    embed::site::{INDEX_HTML, IndexVars, LayoutVars, PODCAST_HTML, PodcastVars},
    image::cover::COVER_FILE,
    log,
    podcast::Podcast,
    utils::{
        date::Timestamp,
        html::{SafeHtml, escape, escape_attr},
    },
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Write every page plus `sitemap.xml`. Returns the number of HTML files.
///
/// `podcasts` must already be sorted newest first.
pub fn write_site(
    config: &SiteConfig,
    templates: &TemplateCache,
    podcasts: &[Podcast],
) -> Result<usize> {
    let output = &config.build.output;
    let base = config.base_url();
    let list = podcast_list(podcasts);
    let mut sitemap = Sitemap::new(base, &config.site.sitemap_floor);

    // Index
    let canonical = format!("{base}/");
    let html = templates.render(
        &INDEX_HTML,
        &IndexVars {
            layout: layout(config, &config.site.title, &canonical, podcasts.len()),
            podcasts: &list,
        },
    );
    write_file(&output.join("index.html"), &html)?;
    sitemap.add("/", podcasts.first().and_then(|p| p.latest_publish));

    // Static pages
    for page in &config.pages {
        let url = format!("/{}.html", page.name);
        let title = format!("{} | {}", page.title, config.site.title);
        let canonical = format!("{base}{url}");
        let html = templates.render_page(
            &page.name,
            &IndexVars {
                layout: layout(config, &title, &canonical, podcasts.len()),
                podcasts: &list,
            },
        )?;
        write_file(&output.join(format!("{}.html", page.name)), &html)?;
        sitemap.add(url, templates.page_mtime(&page.name).map(Timestamp::from_system_time));
    }

    // Podcasts
    podcasts
        .par_iter()
        .try_for_each(|podcast| write_podcast_page(config, templates, podcast, podcasts.len()))?;
    for podcast in podcasts {
        sitemap.add(format!("/{}/", podcast.slug), podcast.latest_publish);
    }

    sitemap.write(&output.join("sitemap.xml"))?;

    let count = 1 + config.pages.len() + podcasts.len();
    log!("page"; "{} pages written to {}", count, output.display());
    Ok(count)
}

fn layout<'a>(
    config: &'a SiteConfig,
    title: &'a str,
    canonical: &'a str,
    podcast_count: usize,
) -> LayoutVars<'a> {
    LayoutVars {
        title,
        canonical,
        site_title: &config.site.title,
        podcast_count,
    }
}

fn write_podcast_page(
    config: &SiteConfig,
    templates: &TemplateCache,
    podcast: &Podcast,
    podcast_count: usize,
) -> Result<()> {
    let title = format!("{} | {}", podcast.title, config.site.title);
    let canonical = format!("{}/{}/", config.base_url(), podcast.slug);
    let cover = format!("/{}/{COVER_FILE}", podcast.slug);
    let links = website_links(podcast);
    let episodes = episode_list(podcast);

    let html = templates.render(
        &PODCAST_HTML,
        &PodcastVars {
            layout: layout(config, &title, &canonical, podcast_count),
            podcast_title: &podcast.title,
            podcast_description: &podcast.description,
            cover: &cover,
            latest_publish: &podcast.latest_publish_display,
            links: &links,
            episodes: &episodes,
        },
    );

    let path = config.build.output.join(&podcast.slug).join("index.html");
    write_file(&path, &html)?;
    debug!("page"; "{}", path.display());
    Ok(())
}

/// `<li>` entries for the overview, in the given order.
fn podcast_list(podcasts: &[Podcast]) -> SafeHtml {
    let mut html = String::new();
    for podcast in podcasts {
        let slug = escape_attr(&podcast.slug);
        let title = escape(&podcast.title);
        let latest = match podcast.latest_episode() {
            Some(episode) => format!(
                "{}: {}",
                escape(&podcast.latest_publish_display),
                escape(&episode.title)
            ),
            None => escape(&podcast.latest_publish_display).into_owned(),
        };

        html.push_str(&format!(
            r#"        <li class="podcast">
            <a href="/{slug}/"><img src="/{slug}/{COVER_FILE}" alt="{title}" width="96" height="96" loading="lazy"></a>
            <div>
                <a href="/{slug}/"><h2>{title}</h2></a>
                <p class="meta">{latest}</p>
            </div>
        </li>
"#
        ));
    }
    SafeHtml::trusted(html)
}

/// One `<article>` per episode, in feed order.
fn episode_list(podcast: &Podcast) -> SafeHtml {
    let mut html = String::new();
    for episode in &podcast.episodes {
        let heading = if episode.link.is_empty() {
            SafeHtml::from_text(&episode.title)
        } else {
            SafeHtml::trusted(format!(
                r#"<a href="{}" target="_blank">{}</a>"#,
                escape_attr(&episode.link),
                escape(&episode.title)
            ))
        };

        html.push_str(&format!(
            r#"    <article class="episode">
        <h3>{heading}</h3>
        <p class="meta">{} · {}</p>
        <div class="description">{}</div>
    </article>
"#,
            escape(&episode.published_display),
            escape(&episode.duration),
            episode.description,
        ));
    }
    SafeHtml::trusted(html)
}

/// Website, optional secondary website, and feed links.
fn website_links(podcast: &Podcast) -> SafeHtml {
    let mut links = Vec::with_capacity(3);
    if !podcast.website_url.is_empty() {
        links.push(format!(
            r#"<a href="{}" target="_blank">Website</a>"#,
            escape_attr(&podcast.website_url)
        ));
    }
    if let Some(secondary) = &podcast.secondary_website_url {
        links.push(format!(
            r#"<a href="{}" target="_blank">Website (Feed)</a>"#,
            escape_attr(secondary)
        ));
    }
    links.push(format!(
        r#"<a href="{}" target="_blank">Feed</a>"#,
        escape_attr(&podcast.feed_url)
    ));
    SafeHtml::trusted(links.join(" · "))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::podcast::Episode;
    use crate::utils::date::parse_feed_date;
    use tempfile::TempDir;

    fn episode(title: &str, date: &str) -> Episode {
        Episode {
            title: title.into(),
            description: SafeHtml::trusted("<p>Notes</p>"),
            published: parse_feed_date(date),
            published_display: date.into(),
            link: "https://lauf.example/1?a=1&b=2".into(),
            duration: "0:42:00".into(),
        }
    }

    fn podcast(slug: &str, title: &str, date: &str) -> Podcast {
        let episodes = vec![episode("Folge <1>", date)];
        Podcast {
            slug: slug.into(),
            title: title.into(),
            description: SafeHtml::trusted("<p>Über den Podcast</p>"),
            feed_url: format!("https://{slug}.example/feed.xml"),
            website_url: format!("https://{slug}.example"),
            secondary_website_url: None,
            image_url: None,
            latest_publish: episodes[0].published,
            latest_publish_display: date.into(),
            episodes,
        }
    }

    fn config(dir: &Path) -> SiteConfig {
        let mut config = test_parse_config(
            r#"
[[pages]]
name = "info"
title = "Info"
"#,
        );
        config.build.output = dir.join("out");
        config.build.templates = dir.join("templates");
        config
    }

    fn build(dir: &Path, podcasts: &[Podcast]) -> SiteConfig {
        let config = config(dir);
        fs::create_dir_all(&config.build.templates).unwrap();
        fs::write(config.build.templates.join("info.html"), "<p>Info</p>").unwrap();
        let templates = TemplateCache::load(&config.build.templates, &["info"]).unwrap();
        let count = write_site(&config, &templates, podcasts).unwrap();
        assert_eq!(count, 2 + podcasts.len());
        config
    }

    #[test]
    fn test_write_site_layout() {
        let dir = TempDir::new().unwrap();
        let podcasts = [
            podcast("b", "B & Co", "2023-10-09"),
            podcast("a", "A", "2023-10-01"),
        ];
        let config = build(dir.path(), &podcasts);
        let out = &config.build.output;

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("<title>Test</title>"));
        assert!(index.contains(r#"<link rel="canonical" href="https://lauf.example/">"#));
        assert!(index.find("/b/").unwrap() < index.find("/a/").unwrap());
        assert!(index.contains("<h2>B &amp; Co</h2>"));
        assert!(index.contains("2023-10-09: Folge &lt;1&gt;"));

        let info = fs::read_to_string(out.join("info.html")).unwrap();
        assert!(info.contains("<title>Info | Test</title>"));
        assert!(info.contains("<p>Info</p>"));

        let page = fs::read_to_string(out.join("b").join("index.html")).unwrap();
        assert!(page.contains("<title>B &amp; Co | Test</title>"));
        assert!(page.contains("<p>Über den Podcast</p>"));
        assert!(page.contains("<p>Notes</p>"));
        assert!(page.contains(r#"href="https://lauf.example/1?a=1&amp;b=2""#));
        assert!(page.contains("2023-10-09 · 0:42:00"));
        assert!(page.contains(r#"src="/b/cover.jpg""#));
    }

    #[test]
    fn test_write_site_sitemap_order() {
        let dir = TempDir::new().unwrap();
        let podcasts = [
            podcast("b", "B", "2023-10-09"),
            podcast("a", "A", "2023-10-01"),
        ];
        let config = build(dir.path(), &podcasts);

        let xml = fs::read_to_string(config.build.output.join("sitemap.xml")).unwrap();
        let locs: Vec<&str> = xml
            .lines()
            .filter_map(|l| l.trim().strip_prefix("<loc>"))
            .collect();
        assert_eq!(
            locs,
            [
                "https://lauf.example/</loc>",
                "https://lauf.example/info.html</loc>",
                "https://lauf.example/b/</loc>",
                "https://lauf.example/a/</loc>",
            ]
        );
        // `/` carries the newest podcast's date.
        assert!(xml.contains("<lastmod>2023-10-09</lastmod>\n    </url>\n    <url>\n        <loc>https://lauf.example/info.html"));
    }

    #[test]
    fn test_write_site_without_podcasts() {
        let dir = TempDir::new().unwrap();
        let config = build(dir.path(), &[]);
        assert!(config.build.output.join("index.html").exists());
        assert!(config.build.output.join("sitemap.xml").exists());
    }

    #[test]
    fn test_website_links() {
        let mut p = podcast("a", "A", "2023-10-01");
        p.secondary_website_url = Some("https://other.example".into());
        let html = website_links(&p);
        assert_eq!(
            html.as_str(),
            r#"<a href="https://a.example" target="_blank">Website</a> · <a href="https://other.example" target="_blank">Website (Feed)</a> · <a href="https://a.example/feed.xml" target="_blank">Feed</a>"#
        );

        p.website_url.clear();
        p.secondary_website_url = None;
        assert!(!website_links(&p).as_str().contains("Website"));
    }
}
