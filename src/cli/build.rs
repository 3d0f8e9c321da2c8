//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Init** - Output and cache directories, templates
//! - **Feeds** - Parallel fetch and parse, sort newest first
//! - **Covers** - Parallel cover scaling with default fallback
//! - **Pages** - Index, static pages, podcast pages, sitemap

use super::common::{fetch_podcasts, select_entries};
use crate::{
    config::SiteConfig,
    generator::{TemplateCache, write_site},
    image::cover::{CoverSettings, CoverSource},
    log,
    logger::ProgressLine,
    podcast::Podcast,
    utils::plural::plural_count,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Outcome of a build, for the summary line and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub podcasts: usize,
    pub default_covers: usize,
    /// Configured podcasts missing from the output: invalid or duplicate
    /// entries and feeds that failed to load.
    pub skipped: usize,
    pub pages: usize,
}

/// Build the entire site
///
/// Pipeline: init -> feeds -> covers -> pages
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildStats> {
    let start = Instant::now();
    let templates = init_build(config)?;

    // Feeds
    let jobs = select_entries(&config.podcasts);
    if jobs.is_empty() {
        log!("warn"; "no podcasts configured in {}", config.config_path.display());
    }
    let progress = (!quiet).then(|| ProgressLine::new(&[("feeds", jobs.len())]));
    let podcasts = fetch_podcasts(config, &jobs, progress.as_ref());
    if let Some(p) = progress {
        p.finish();
    }

    // Covers
    let default_covers = build_covers(config, &podcasts, quiet)?;

    // Pages
    let pages = write_site(config, &templates, &podcasts)?;

    let stats = BuildStats {
        podcasts: podcasts.len(),
        default_covers,
        pages,
        skipped: config.podcasts.len().saturating_sub(podcasts.len()),
    };
    if !quiet {
        log_build_result(&stats, start);
    }
    Ok(stats)
}

/// Create output and cache directories and load all templates.
fn init_build(config: &SiteConfig) -> Result<TemplateCache> {
    for dir in [&config.build.output, &config.build.cache] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let pages: Vec<&str> = config.pages.iter().map(|p| p.name.as_str()).collect();
    TemplateCache::load(&config.build.templates, &pages)
}

/// Write `<slug>/cover.jpg` for every podcast. Returns how many fell back
/// to the default cover.
fn build_covers(config: &SiteConfig, podcasts: &[Podcast], quiet: bool) -> Result<usize> {
    let settings = CoverSettings {
        cache_dir: config.build.cache.clone(),
        output_dir: config.build.output.clone(),
        default_cover: config.build.default_cover.clone(),
        size: config.build.cover_size,
        policy: config.fetch_policy(),
    };
    let defaults = AtomicUsize::new(0);
    let progress = (!quiet).then(|| ProgressLine::new(&[("covers", podcasts.len())]));

    let result = podcasts.par_iter().try_for_each(|podcast| -> Result<()> {
        let source = settings.build(&podcast.slug, podcast.image_url.as_deref())?;
        if source == CoverSource::Default {
            defaults.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(p) = &progress {
            p.inc("covers");
        }
        Ok(())
    });

    if let Some(p) = progress {
        p.finish();
    }
    result?;
    Ok(defaults.into_inner())
}

fn log_build_result(stats: &BuildStats, start: Instant) {
    if stats.skipped > 0 {
        log!("warn"; "{} skipped, see messages above", plural_count(stats.skipped, "podcast"));
    }
    if stats.default_covers > 0 {
        log!("cover"; "{} with default cover", plural_count(stats.default_covers, "podcast"));
    }
    log!(
        "build";
        "done: {}, {} in {:.1}s",
        plural_count(stats.podcasts, "podcast"),
        plural_count(stats.pages, "page"),
        start.elapsed().as_secs_f64()
    );
}
