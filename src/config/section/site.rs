//! `[site]` configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::date::{DateTime, ZERO_DATE};
use serde::Deserialize;

/// Site metadata used for titles, canonical links and the sitemap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title, also the suffix of every page title.
    pub title: String,

    /// Public base URL (e.g., "https://lauf-podcasts.example").
    pub url: String,

    /// Earliest `lastmod` written to the sitemap, `YYYY-MM-DD`.
    pub sitemap_floor: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            sitemap_floor: ZERO_DATE.into(),
        }
    }
}

impl SiteSectionConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const SITEMAP_FLOOR: FieldPath = FieldPath::new("site.sitemap_floor");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` is an absolute http(s) URL with a host
    /// - `sitemap_floor` is a valid `YYYY-MM-DD` date
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.warn(Self::TITLE, "empty, page titles will only show their own part");
        }

        if self.url.is_empty() {
            diag.error_with_hint(
                Self::URL,
                "not configured",
                "set it to the public address, e.g. \"https://example.com\"",
            );
        } else {
            match url::Url::parse(&self.url) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::URL,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        if DateTime::parse_date(&self.sitemap_floor).is_none() {
            diag.error_with_hint(
                Self::SITEMAP_FLOOR,
                format!("invalid date '{}'", self.sitemap_floor),
                "use format YYYY-MM-DD, e.g. \"2023-09-07\"",
            );
        }
    }
}
