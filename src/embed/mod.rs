//! Embedded default templates for the generated site.
//!
//! Every built-in template can be overridden by a file of the same name in
//! the configured templates directory. Pages are assembled as
//! `header + body + footer`, and the variables of the body apply to all
//! three parts.
//!
//! # Usage
//!
//! ```ignore
//! use embed::site::{INDEX_HTML, IndexVars, LayoutVars};
//!
//! let vars = IndexVars { layout, podcasts: &list };
//! let html = cache.render(&INDEX_HTML, &vars)?;
//! ```

mod template;

pub use template::{Template, TemplateVars, substitute};

pub mod site {
    use super::{Template, TemplateVars, substitute};
    use crate::utils::html::{SafeHtml, escape};

    /// Shared page chrome, included around every body template.
    pub const HEADER_HTML: Template<()> = Template::new("header.html", include_str!("site/header.html"));
    pub const FOOTER_HTML: Template<()> = Template::new("footer.html", include_str!("site/footer.html"));

    /// Podcast overview at `/`.
    pub const INDEX_HTML: Template<IndexVars<'static>> =
        Template::new("index.html", include_str!("site/index.html"));

    /// Per-podcast page at `/<slug>/`.
    pub const PODCAST_HTML: Template<PodcastVars<'static>> =
        Template::new("podcast.html", include_str!("site/podcast.html"));

    /// Variables available on every page.
    #[derive(Debug, Clone, Copy)]
    pub struct LayoutVars<'a> {
        pub title: &'a str,
        pub canonical: &'a str,
        pub site_title: &'a str,
        pub podcast_count: usize,
    }

    impl LayoutVars<'_> {
        fn pairs(&self) -> [(&'static str, String); 4] {
            [
                ("TITLE", escape(self.title).into_owned()),
                ("CANONICAL", escape(self.canonical).into_owned()),
                ("SITE_TITLE", escape(self.site_title).into_owned()),
                ("PODCAST_COUNT", self.podcast_count.to_string()),
            ]
        }
    }

    impl TemplateVars for LayoutVars<'_> {
        fn apply(&self, content: &str) -> String {
            let pairs = self.pairs();
            let vars: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
            substitute(content, &vars)
        }
    }

    /// Index and static pages: the layout plus the rendered podcast list.
    pub struct IndexVars<'a> {
        pub layout: LayoutVars<'a>,
        pub podcasts: &'a SafeHtml,
    }

    impl TemplateVars for IndexVars<'_> {
        fn apply(&self, content: &str) -> String {
            let pairs = self.layout.pairs();
            let mut vars: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
            vars.push(("PODCASTS", self.podcasts.as_str()));
            substitute(content, &vars)
        }
    }

    /// A single podcast page.
    pub struct PodcastVars<'a> {
        pub layout: LayoutVars<'a>,
        pub podcast_title: &'a str,
        pub podcast_description: &'a SafeHtml,
        pub cover: &'a str,
        pub latest_publish: &'a str,
        pub links: &'a SafeHtml,
        pub episodes: &'a SafeHtml,
    }

    impl TemplateVars for PodcastVars<'_> {
        fn apply(&self, content: &str) -> String {
            let pairs = self.layout.pairs();
            let podcast_title = escape(self.podcast_title);
            let cover = escape(self.cover);
            let latest_publish = escape(self.latest_publish);

            let mut vars: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
            vars.extend([
                ("PODCAST_TITLE", podcast_title.as_ref()),
                ("PODCAST_DESCRIPTION", self.podcast_description.as_str()),
                ("COVER", cover.as_ref()),
                ("LATEST_PUBLISH", latest_publish.as_ref()),
                ("LINKS", self.links.as_str()),
                ("EPISODES", self.episodes.as_str()),
            ]);
            substitute(content, &vars)
        }
    }

}
