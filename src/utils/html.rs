//! HTML utility functions.
//!
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `SafeHtml` - markup that may be embedded without further escaping

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape("<script>"), "&lt;script&gt;");
/// assert_eq!(escape("hello"), "hello"); // No allocation
/// ```
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape HTML attribute values.
///
/// Identical to `escape()` but semantically indicates attribute context.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Markup that is safe to embed in a page as-is.
///
/// Only produced by the content renderer (or by escaping), so templates
/// insert it verbatim while plain `&str` values are always escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// Trust `html` without escaping it.
    pub fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escape `text` so it can be embedded as markup.
    pub fn from_text(text: &str) -> Self {
        Self(escape(text).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("hello"), "hello");
        assert_eq!(escape("<test>"), "&lt;test&gt;");
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_borrows_when_clean() {
        assert!(matches!(escape("plain text"), Cow::Borrowed(_)));
        assert!(matches!(escape_attr("a<b"), Cow::Owned(_)));
    }

    #[test]
    fn test_safe_html() {
        assert_eq!(SafeHtml::from_text("<b>").as_str(), "&lt;b&gt;");
        assert_eq!(SafeHtml::trusted("<b>x</b>").to_string(), "<b>x</b>");
        assert_eq!(
            serde_json::to_string(&SafeHtml::trusted("<p>")).unwrap(),
            r#""<p>""#
        );
    }
}
