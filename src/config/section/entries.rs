//! `[[pages]]` and `[[podcasts]]` entries.

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::slug::sanitize;
use rustc_hash::FxHashSet;
use serde::Deserialize;

/// A static page rendered from `templates/<name>.html` to `<name>.html`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageEntry {
    pub name: String,
    pub title: String,
}

impl PageEntry {
    pub const NAME: FieldPath = FieldPath::new("pages.name");

    /// Validate all page entries together.
    ///
    /// # Checks
    /// - names are non-empty slugs (`sanitize(name) == name`)
    /// - `index` is reserved for the overview page
    /// - names are unique
    pub fn validate_all(pages: &[Self], diag: &mut ConfigDiagnostics) {
        let mut seen = FxHashSet::default();
        for page in pages {
            let slug = sanitize(&page.name);
            if page.name.is_empty() || slug != page.name {
                diag.error_with_hint(
                    Self::NAME,
                    format!("'{}' is not a valid page name", page.name),
                    if slug.is_empty() {
                        "use lowercase letters, digits and '-'".to_owned()
                    } else {
                        format!("use \"{slug}\"")
                    },
                );
            } else if page.name == "index" {
                diag.error(Self::NAME, "'index' is reserved for the podcast overview");
            } else if !seen.insert(page.name.as_str()) {
                diag.error(Self::NAME, format!("duplicate page '{}'", page.name));
            }
        }
    }
}

/// One podcast of the site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PodcastEntry {
    /// Display name; its slug names the output directory and cache files.
    pub name: String,

    /// Feed URL. Entries without one are skipped.
    pub feed: String,

    /// Website, preferred over the link inside the feed.
    pub website: Option<String>,
}

impl PodcastEntry {
    pub fn slug(&self) -> String {
        sanitize(&self.name)
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref().filter(|w| !w.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(name: &str) -> PageEntry {
        PageEntry {
            name: name.into(),
            title: name.into(),
        }
    }

    fn messages(pages: &[PageEntry]) -> Vec<String> {
        let mut diag = ConfigDiagnostics::new();
        PageEntry::validate_all(pages, &mut diag);
        diag.errors().iter().map(|e| e.message.clone()).collect()
    }

    #[test]
    fn test_valid_pages() {
        assert!(messages(&[page("info"), page("impressum"), page("about-us")]).is_empty());
    }

    #[test]
    fn test_invalid_page_names() {
        let errors = messages(&[page("Info"), page(""), page("index"), page("a"), page("a")]);
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("'Info'"));
        assert!(errors[2].contains("reserved"));
        assert!(errors[3].contains("duplicate"));
    }

    #[test]
    fn test_podcast_entry_helpers() {
        let entry = PodcastEntry {
            name: "Laufen & Leben".into(),
            feed: "https://example.com/feed".into(),
            website: Some(String::new()),
        };
        assert_eq!(entry.slug(), "laufen-leben");
        assert_eq!(entry.website(), None);
    }
}
