//! Pluralization for log summaries.

/// Format a count with an English noun.
///
/// - `plural_count(0, "podcast")` -> `"0 podcasts"`
/// - `plural_count(1, "podcast")` -> `"1 podcast"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
