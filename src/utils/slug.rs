//! URL slug generation for podcast names.
//!
//! A slug is used both as a URL path segment (`/<slug>/`) and as a directory
//! name in the output and cache folders, so it must be stable across runs and
//! restricted to `[a-z0-9-]`.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Non-spacing marks (`Mn`) left over from canonical decomposition.
/// Spacing and enclosing marks stay and end up as separators.
static NON_SPACING_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Mn}+").expect("valid regex"));

/// Spelled-out replacements applied before diacritics are stripped.
const TRANSLITERATIONS: [(char, &str); 4] = [('ä', "ae"), ('ö', "oe"), ('ü', "ue"), ('ß', "ss")];

/// Characters that always separate words.
const SEPARATORS: [char; 6] = [' ', '.', '\'', '"', '(', ')'];

/// Turn a display name into a lowercase, ASCII, hyphen-delimited slug.
///
/// Returns an empty string when the name contains no Latin letters or
/// digits. Callers must skip such entries instead of writing to an empty path.
///
/// # Examples
/// ```ignore
/// assert_eq!(sanitize("Laufen mit Spaß"), "laufen-mit-spass");
/// assert_eq!(sanitize("Café (Podcast)"), "cafe-podcast");
/// ```
pub fn sanitize(name: &str) -> String {
    let mut spelled = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        match TRANSLITERATIONS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => spelled.push_str(to),
            None if SEPARATORS.contains(&c) => spelled.push('-'),
            None => spelled.push(c),
        }
    }

    let decomposed: String = spelled.nfd().collect();
    let stripped = NON_SPACING_MARK.replace_all(&decomposed, "");

    let mut slug = String::with_capacity(stripped.len());
    // Starts "after a separator" so no leading hyphen is emitted.
    let mut after_separator = true;
    for c in stripped.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            after_separator = false;
        } else if !after_separator {
            slug.push('-');
            after_separator = true;
        }
    }

    if after_separator {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_clean(slug: &str) -> bool {
        slug.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
    }

    #[test]
    fn test_sanitize_umlauts_and_accents() {
        let slug = sanitize("Müller's Café");
        assert_eq!(slug, "mueller-s-cafe");
        assert!(is_clean(&slug));
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_eszett_and_uppercase_umlauts() {
        assert_eq!(sanitize("Laufen mit Spaß"), "laufen-mit-spass");
        assert_eq!(sanitize("ÖKO LÄUFER"), "oeko-laeufer");
    }

    #[test]
    fn test_sanitize_collapses_separator_runs() {
        assert_eq!(sanitize("a  --  b"), "a-b");
        assert_eq!(sanitize("Run (the) \"Podcast\"."), "run-the-podcast");
        assert_eq!(sanitize("  leading"), "leading");
        assert_eq!(sanitize("trailing!!!"), "trailing");
    }

    #[test]
    fn test_sanitize_keeps_digits() {
        assert_eq!(sanitize("42 km & mehr"), "42-km-mehr");
        assert_eq!(sanitize("2023"), "2023");
    }

    #[test]
    fn test_sanitize_other_diacritics() {
        assert_eq!(sanitize("Señor Ñandú"), "senor-nandu");
        assert_eq!(sanitize("Crème brûlée"), "creme-brulee");
    }

    #[test]
    fn test_sanitize_only_drops_non_spacing_marks() {
        assert_eq!(sanitize("e\u{301}tude"), "etude");
        // Enclosing (Me) and spacing (Mc) marks separate words
        assert_eq!(sanitize("a\u{20DD}b"), "a-b");
        assert_eq!(sanitize("a\u{903}b"), "a-b");
    }

    #[test]
    fn test_sanitize_non_latin_is_empty() {
        assert_eq!(sanitize("走る"), "");
        assert_eq!(sanitize("---"), "");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn test_sanitize_is_stable() {
        let once = sanitize("Müller's Café");
        assert_eq!(sanitize(&once), once);
    }
}
