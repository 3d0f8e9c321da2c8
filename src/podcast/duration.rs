//! Episode duration normalization.

/// Whitespace as understood by feed producers (`\s` in ASCII terms).
fn is_feed_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Format a duration given in raw seconds as `H:MM:SS`.
///
/// Anything that is not a (whitespace-padded) number of seconds, such as an
/// already formatted `1:02:03` or `45:10`, is returned unchanged.
///
/// # Examples
/// ```ignore
/// assert_eq!(normalize_duration("3661"), "1:01:01");
/// assert_eq!(normalize_duration("45:10"), "45:10");
/// ```
pub fn normalize_duration(raw: &str) -> String {
    let digits = raw.trim_matches(is_feed_whitespace);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_owned();
    }
    let Ok(total) = digits.parse::<u64>() else {
        return raw.to_owned();
    };

    let seconds = total % 60;
    let minutes = (total / 60) % 60;
    let hours = total / 60 / 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_are_formatted() {
        assert_eq!(normalize_duration("125"), "0:02:05");
        assert_eq!(normalize_duration("3661"), "1:01:01");
        assert_eq!(normalize_duration("0"), "0:00:00");
        assert_eq!(normalize_duration("59"), "0:00:59");
    }

    #[test]
    fn test_hours_are_unbounded_and_unpadded() {
        assert_eq!(normalize_duration("360000"), "100:00:00");
        assert_eq!(normalize_duration("36000"), "10:00:00");
    }

    #[test]
    fn test_whitespace_padding() {
        assert_eq!(normalize_duration("  125\n"), "0:02:05");
        assert_eq!(normalize_duration("\t3661 "), "1:01:01");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(normalize_duration("1:02:03"), "1:02:03");
        assert_eq!(normalize_duration("45:10"), "45:10");
        assert_eq!(normalize_duration("unbekannt"), "unbekannt");
        assert_eq!(normalize_duration(""), "");
        assert_eq!(normalize_duration("12 min"), "12 min");
        assert_eq!(normalize_duration("-5"), "-5");
    }

    #[test]
    fn test_overflow_passes_through() {
        let huge = "99999999999999999999999";
        assert_eq!(normalize_duration(huge), huge);
    }
}
