//! URL helpers.

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// # Examples
/// ```ignore
/// assert!(is_external_link("https://example.com"));
/// assert!(!is_external_link("/about"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Two site URLs are considered the same site when one is a prefix of the other.
///
/// `https://example.com` and `https://example.com/podcast/` match, while
/// `https://example.com` and `https://other.org` do not.
#[inline]
pub fn is_same_site(a: &str, b: &str) -> bool {
    a.starts_with(b) || b.starts_with(a)
}
