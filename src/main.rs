//! Podpage - a static site generator for podcast directories.
//!
//! Reads a list of podcasts from `podpage.toml`, fetches and caches their
//! RSS/Atom feeds, and writes an overview page, one page per podcast with
//! all episodes, square cover images, and a sitemap.

mod cli;
mod config;
mod embed;
mod feed;
mod fetch;
mod generator;
mod image;
mod logger;
mod podcast;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_site};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config, false).map(|_| ()),
        Commands::Query { args } => cli::query::run_query(args, &config),
    }
}
