//! Rendering of feed descriptions to embeddable HTML.
//!
//! Feeds mix three kinds of description text: ready-made HTML, Markdown, and
//! plain text with line breaks. The kind is guessed by counting marker
//! characters; the thresholds are tuned to the feeds seen in the wild and
//! must stay at two of each.

use crate::utils::{
    html::{SafeHtml, escape_attr},
    slug::sanitize,
    url::is_external_link,
};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// Bare `http(s)://` URLs in plain text, up to the next ASCII whitespace.
///
/// The class is spelled out since `\S` needs regex's `unicode-perl` feature.
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https?://[^ \t\n\r\x0C]+)").expect("valid regex"));

/// Format of a description, decided by [`ContentFormat::detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Html,
    Markdown,
    PlainText,
}

impl ContentFormat {
    /// Classify `text`: at least two `<` and two `>` is HTML, at least two
    /// `*` or `[` combined is Markdown, anything else is plain text.
    pub fn detect(text: &str) -> Self {
        let count = |marker: char| text.matches(marker).count();
        if count('<') >= 2 && count('>') >= 2 {
            Self::Html
        } else if count('*') + count('[') >= 2 {
            Self::Markdown
        } else {
            Self::PlainText
        }
    }
}

/// Rendering switches taken from `[build]` in the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Turn bare URLs in plain-text descriptions into links.
    pub autolink: bool,
}

/// Render a (cleaned) description to HTML.
///
/// HTML input is trusted and passed through verbatim. Never fails; broken
/// Markdown renders to whatever the parser makes of it.
pub fn render_html(raw: &str, options: RenderOptions) -> SafeHtml {
    match ContentFormat::detect(raw) {
        ContentFormat::Html => SafeHtml::trusted(raw),
        ContentFormat::Markdown => SafeHtml::trusted(render_markdown(raw)),
        ContentFormat::PlainText => SafeHtml::trusted(render_plain_text(raw, options.autolink)),
    }
}

fn render_plain_text(text: &str, autolink: bool) -> String {
    let text = if autolink {
        BARE_URL.replace_all(text, r#"<a href="$1" target="_blank">$1</a>"#)
    } else {
        text.into()
    };
    text.replace('\n', "<br>")
}

fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION;

    let mut events: Vec<Event<'_>> = Parser::new_ext(text, options).collect();
    assign_heading_ids(&mut events);

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter().map(open_external_links_in_new_tab));
    out
}

/// Give every heading an `id` derived from its text.
///
/// Repeated headings get `-1`, `-2`, ... suffixes so anchors stay unique.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();

    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }

        let base = sanitize(&heading_text(&events[i + 1..]));
        if base.is_empty() {
            continue;
        }
        let unique = match seen.get_mut(&base) {
            Some(count) => {
                *count += 1;
                format!("{base}-{count}")
            }
            None => {
                seen.insert(base.clone(), 0);
                base
            }
        };

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(unique));
        }
    }
}

/// Text content up to the end of the current heading.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Rewrite the opening tag of external links to carry `target="_blank"`.
///
/// The matching `End(Link)` still renders as `</a>`.
fn open_external_links_in_new_tab(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) if is_external_link(&dest_url) => {
            let mut tag = format!(r#"<a href="{}""#, escape_attr(&dest_url));
            if !title.is_empty() {
                tag.push_str(&format!(r#" title="{}""#, escape_attr(&title)));
            }
            tag.push_str(r#" target="_blank">"#);
            Event::InlineHtml(tag.into())
        }
        other => other,
    }
}
