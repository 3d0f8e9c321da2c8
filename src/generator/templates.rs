//! Template lookup with directory overrides.
//!
//! All templates are read once up front, so rendering needs only `&self` and
//! can run from rayon workers.

use crate::{
    debug,
    embed::{
        Template, TemplateVars,
        site::{FOOTER_HTML, HEADER_HTML, INDEX_HTML, IndexVars, PODCAST_HTML},
    },
    utils::mtime::get_mtime,
};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug)]
struct Loaded {
    content: String,
    mtime: Option<SystemTime>,
}

/// Templates of one build, keyed by file name (`index.html`, `info.html`).
#[derive(Debug)]
pub struct TemplateCache {
    dir: PathBuf,
    files: FxHashMap<String, Loaded>,
}

impl TemplateCache {
    /// Read overrides for the built-in templates and every static page.
    ///
    /// Built-ins missing from `dir` fall back to their embedded version;
    /// a missing static page template is an error.
    pub fn load(dir: &Path, pages: &[&str]) -> Result<Self> {
        let mut cache = Self {
            dir: dir.to_path_buf(),
            files: FxHashMap::default(),
        };

        for name in [
            HEADER_HTML.name(),
            FOOTER_HTML.name(),
            INDEX_HTML.name(),
            PODCAST_HTML.name(),
        ] {
            let path = dir.join(name);
            if path.is_file() {
                cache.read(name, &path)?;
            }
        }

        for page in pages {
            let name = page_file(page);
            let path = dir.join(&name);
            if !path.is_file() {
                bail!("template for page '{page}' not found: {}", path.display());
            }
            cache.read(&name, &path)?;
        }

        Ok(cache)
    }

    fn read(&mut self, name: &str, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        debug!("page"; "template override {}", path.display());
        self.files.insert(
            name.to_owned(),
            Loaded {
                content,
                mtime: get_mtime(path),
            },
        );
        Ok(())
    }

    /// Source of a built-in template, preferring the directory override.
    fn source<V>(&self, template: &Template<V>) -> &str {
        self.files
            .get(template.name())
            .map_or(template.content(), |t| t.content.as_str())
    }

    fn assemble(&self, body: &str) -> String {
        let header = self.source(&HEADER_HTML);
        let footer = self.source(&FOOTER_HTML);
        let mut page = String::with_capacity(header.len() + body.len() + footer.len());
        page.push_str(header);
        page.push_str(body);
        page.push_str(footer);
        page
    }

    /// Render a built-in page template between header and footer.
    pub fn render<V: TemplateVars>(&self, template: &Template<V>, vars: &V) -> String {
        vars.apply(&self.assemble(self.source(template)))
    }

    /// Render a static page template between header and footer.
    pub fn render_page(&self, page: &str, vars: &IndexVars<'_>) -> Result<String> {
        let name = page_file(page);
        let Some(loaded) = self.files.get(&name) else {
            bail!("template for page '{page}' not loaded from {}", self.dir.display());
        };
        Ok(vars.apply(&self.assemble(&loaded.content)))
    }

    /// Modification time of a static page template.
    pub fn page_mtime(&self, page: &str) -> Option<SystemTime> {
        self.files.get(&page_file(page)).and_then(|t| t.mtime)
    }
}

fn page_file(page: &str) -> String {
    format!("{page}.html")
}
