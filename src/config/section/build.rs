//! `[build]` configuration.
//!
//! Relative paths are resolved against the directory of `podpage.toml` when
//! the config is loaded.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Paths and tuning knobs of a build.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Output directory for the generated site.
    pub output: PathBuf,

    /// Download cache for feeds (`<slug>.feed`) and covers (`<slug>.cover`).
    pub cache: PathBuf,

    /// Directory with template overrides and static page templates.
    pub templates: PathBuf,

    /// Cover used when a feed has no usable image.
    pub default_cover: PathBuf,

    /// Edge length of generated square covers, in pixels.
    pub cover_size: u32,

    /// Seconds a cached download stays fresh.
    pub max_age: u64,

    /// Turn bare URLs in plain-text descriptions into links.
    pub autolink: bool,

    /// Only use cached downloads (set by `--offline`).
    #[serde(skip)]
    pub offline: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: ".out".into(),
            cache: ".cache".into(),
            templates: "templates".into(),
            default_cover: "default-cover.jpg".into(),
            cover_size: 512,
            max_age: 24 * 60 * 60,
            autolink: false,
            offline: false,
        }
    }
}

impl BuildSectionConfig {
    pub const COVER_SIZE: FieldPath = FieldPath::new("build.cover_size");
    pub const DEFAULT_COVER: FieldPath = FieldPath::new("build.default_cover");

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age)
    }

    /// Resolve every relative path against `root`.
    pub fn normalize(&mut self, root: &Path) {
        for path in [
            &mut self.output,
            &mut self.cache,
            &mut self.templates,
            &mut self.default_cover,
        ] {
            *path = root.join(&*path);
        }
    }

    /// Validate build configuration.
    ///
    /// # Checks
    /// - `cover_size` is positive
    /// - `default_cover` exists (warning only; it is needed once a cover
    ///   falls back)
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.cover_size == 0 {
            diag.error_with_hint(Self::COVER_SIZE, "must be greater than 0", "e.g. 512");
        }

        if !self.default_cover.is_file() {
            diag.warn(
                Self::DEFAULT_COVER,
                format!("{} does not exist", self.default_cover.display()),
            );
        }
    }
}
