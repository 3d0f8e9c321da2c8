//! Date/time utilities without timezone database dependencies.
//!
//! Feeds carry dates in RFC 2822 (`pubDate`) or RFC 3339 (`dc:date`, Atom)
//! with a fixed UTC offset. We keep the wall-clock time together with that
//! offset for display as RFC 3339; ordering and calendar days use the UTC
//! instant.
//!
//! # Examples
//!
//! ```ignore
//! let ts = parse_feed_date("Tue, 03 Oct 2023 01:00:00 +0200").unwrap();
//! assert_eq!(ts.date(), "2023-10-02");
//! assert_eq!(ts.to_string(), "2023-10-03T01:00:00+02:00");
//! ```

use anyhow::{Result, bail};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Date used for values that carry no timestamp at all.
pub const ZERO_DATE: &str = "0001-01-01";

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Civil date and time, without any offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse a plain "YYYY-MM-DD" date.
    pub fn parse_date(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let dt = Self::from_ymd(
            parse_u16(&bytes[0..4])?,
            parse_u8(&bytes[5..7])?,
            parse_u8(&bytes[8..10])?,
        );
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        // 60 is allowed for leap seconds
        if second > 60 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as `YYYY-MM-DD`.
    pub fn format_date(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Seconds since the Unix epoch, reading the fields as UTC.
    fn epoch_seconds(self) -> i64 {
        days_from_civil(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
        ) * 86_400
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_epoch_seconds(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self::new(
            year as u16,
            month as u8,
            day as u8,
            (rem / 3600) as u8,
            (rem % 3600 / 60) as u8,
            (rem % 60) as u8,
        )
    }
}

/// A point in time as written by a feed: wall-clock time plus UTC offset.
///
/// Equality and ordering compare the absolute instant.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    local: DateTime,
    /// Offset east of UTC, in seconds.
    offset: i32,
}

impl Timestamp {
    pub const fn new(local: DateTime, offset: i32) -> Self {
        Self { local, offset }
    }

    pub const fn utc(local: DateTime) -> Self {
        Self::new(local, 0)
    }

    /// Convert a filesystem time (e.g. an mtime) to a UTC timestamp.
    #[allow(clippy::cast_possible_wrap)]
    pub fn from_system_time(time: SystemTime) -> Self {
        let secs = match time.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(e) => -(e.duration().as_secs() as i64),
        };
        Self::from_unix(secs, 0)
    }

    /// Build from seconds since the Unix epoch and an offset east of UTC.
    pub fn from_unix(secs: i64, offset: i32) -> Self {
        Self::new(
            DateTime::from_epoch_seconds(secs + i64::from(offset)),
            offset,
        )
    }

    /// Seconds since the Unix epoch.
    pub fn unix(&self) -> i64 {
        self.local.epoch_seconds() - i64::from(self.offset)
    }

    /// Calendar day of the UTC instant, as `YYYY-MM-DD`.
    pub fn date(&self) -> String {
        DateTime::from_epoch_seconds(self.unix()).format_date()
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.unix() == other.unix()
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unix().cmp(&other.unix())
    }
}

/// RFC 3339 with numeric offset (`Z` for UTC).
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = self.local;
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            l.year, l.month, l.day, l.hour, l.minute, l.second
        )?;
        if self.offset == 0 {
            return f.write_str("Z");
        }
        let sign = if self.offset < 0 { '-' } else { '+' };
        let abs = self.offset.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", abs / 3600, abs % 3600 / 60)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a date as found in RSS or Atom feeds.
///
/// Accepts RFC 2822 (`Mon, 02 Oct 2023 06:00:00 +0200`, optional weekday,
/// optional seconds, numeric or named zone), RFC 3339
/// (`2023-10-02T06:00:00.000+02:00`) and bare `YYYY-MM-DD`.
pub fn parse_feed_date(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    parse_rfc3339(s)
        .or_else(|| DateTime::parse_date(s).map(Timestamp::utc))
        .or_else(|| parse_rfc2822(s))
}

fn parse_rfc3339(s: &str) -> Option<Timestamp> {
    let bytes = s.as_bytes();
    if bytes.len() < 19 || !matches!(bytes[10], b'T' | b't' | b' ') {
        return None;
    }
    let date = DateTime::parse_date(&s[..10])?;
    if bytes[13] != b':' || bytes[16] != b':' {
        return None;
    }
    let local = DateTime::new(
        date.year,
        date.month,
        date.day,
        parse_u8(&bytes[11..13])?,
        parse_u8(&bytes[14..16])?,
        parse_u8(&bytes[17..19])?,
    );
    local.validate().ok()?;

    // Skip fractional seconds
    let mut rest = &s[19..];
    if let Some(frac) = rest.strip_prefix('.') {
        let digits = frac.bytes().take_while(u8::is_ascii_digit).count();
        rest = &frac[digits..];
    }

    let offset = match rest {
        "" | "Z" | "z" => 0,
        _ => parse_numeric_offset(rest)?,
    };
    Some(Timestamp::new(local, offset))
}

fn parse_rfc2822(s: &str) -> Option<Timestamp> {
    // Weekday is optional and not validated
    let s = s.split_once(',').map_or(s, |(_, rest)| rest);
    let mut parts = s.split_whitespace();

    let day: u8 = parts.next()?.parse().ok()?;
    let month = parse_month(parts.next()?)?;
    let year = match parts.next()? {
        y if y.len() == 4 => parse_u16(y.as_bytes())?,
        y if y.len() == 2 => {
            let yy = u16::from(parse_u8(y.as_bytes())?);
            if yy < 50 { 2000 + yy } else { 1900 + yy }
        }
        _ => return None,
    };

    let (hour, minute, second) = match parts.next() {
        Some(time) => parse_clock(time)?,
        None => (0, 0, 0),
    };
    let offset = match parts.next() {
        Some(zone) => parse_zone(zone)?,
        None => 0,
    };

    let local = DateTime::new(year, month, day, hour, minute, second);
    local.validate().ok()?;
    Some(Timestamp::new(local, offset))
}

/// `HH:MM` or `HH:MM:SS`.
fn parse_clock(s: &str) -> Option<(u8, u8, u8)> {
    let mut fields = s.split(':').map(|f| f.parse::<u8>().ok());
    let hour = fields.next()??;
    let minute = fields.next()??;
    let second = fields.next().unwrap_or(Some(0))?;
    if fields.next().is_some() {
        return None;
    }
    Some((hour, minute, second))
}

fn parse_month(s: &str) -> Option<u8> {
    let prefix = s.get(..3)?.to_ascii_lowercase();
    let index = MONTHS.iter().position(|m| *m == prefix)?;
    u8::try_from(index + 1).ok()
}

/// Numeric (`+0200`, `-05:00`) or named zone.
fn parse_zone(zone: &str) -> Option<i32> {
    if zone.starts_with(['+', '-']) {
        return parse_numeric_offset(zone);
    }
    let hours = match zone.to_ascii_uppercase().as_str() {
        "GMT" | "UT" | "UTC" | "Z" => 0,
        "CET" | "MEZ" => 1,
        "CEST" | "MESZ" => 2,
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        // RFC 2822 treats unknown alphabetic zones as UTC
        z if z.chars().all(|c| c.is_ascii_alphabetic()) => 0,
        _ => return None,
    };
    Some(hours * 3600)
}

fn parse_numeric_offset(s: &str) -> Option<i32> {
    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits: String = s[1..].chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 {
        return None;
    }
    let hours = i32::from(parse_u8(&digits.as_bytes()[0..2])?);
    let minutes = i32::from(parse_u8(&digits.as_bytes()[2..4])?);
    if minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
const fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
#[allow(clippy::cast_lossless)] // `From` is not const
const fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + (month <= 2) as i64;
    (year, month, day)
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_date() {
        let dt = DateTime::parse_date("2023-09-07").unwrap();
        assert_eq!(dt, DateTime::from_ymd(2023, 9, 7));
        assert!(DateTime::parse_date("2023-9-7").is_none());
        assert!(DateTime::parse_date("2023-02-30").is_none());
        assert!(DateTime::parse_date("not a date").is_none());
    }

    #[test]
    fn test_validate_leap_year() {
        assert!(DateTime::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTime::new(2000, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTime::new(2023, 2, 29, 12, 0, 0).validate().is_err());
        assert!(DateTime::new(1900, 2, 29, 12, 0, 0).validate().is_err());
    }

    #[test]
    fn test_validate_invalid_fields() {
        assert!(DateTime::new(2024, 13, 1, 0, 0, 0).validate().is_err());
        assert!(DateTime::new(2024, 4, 31, 0, 0, 0).validate().is_err());
        assert!(DateTime::new(2024, 6, 15, 24, 0, 0).validate().is_err());
        assert!(DateTime::new(2024, 6, 15, 12, 60, 0).validate().is_err());
    }

    #[test]
    fn test_civil_days_roundtrip_anchors() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(civil_from_days(11_017), (2000, 3, 1));
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
    }

    #[test]
    fn test_parse_rfc2822() {
        let ts = parse_feed_date("Mon, 02 Oct 2023 06:00:00 +0200").unwrap();
        assert_eq!(ts.date(), "2023-10-02");
        assert_eq!(ts.to_string(), "2023-10-02T06:00:00+02:00");
        assert_eq!(ts.unix(), 1_696_219_200);
    }

    #[test]
    fn test_parse_rfc2822_variants() {
        let gmt = parse_feed_date("Mon, 2 Oct 2023 04:00:00 GMT").unwrap();
        let no_weekday = parse_feed_date("2 Oct 2023 04:00 GMT").unwrap();
        let est = parse_feed_date("Mon, 02 Oct 2023 00:00:00 EDT").unwrap();
        assert_eq!(gmt, no_weekday);
        assert_eq!(gmt, est);
        assert_eq!(parse_feed_date("02 Oct 23 04:00:00 +0000").unwrap(), gmt);
    }

    #[test]
    fn test_date_is_utc_day() {
        let ts = parse_feed_date("Tue, 03 Oct 2023 01:00:00 +0200").unwrap();
        assert_eq!(ts.date(), "2023-10-02");
        let utc = parse_feed_date("2023-10-02T23:00:00Z").unwrap();
        assert_eq!(ts, utc);
        assert_eq!(utc.date(), "2023-10-02");

        // West of UTC the day moves forward
        let west = parse_feed_date("Mon, 02 Oct 2023 22:30:00 -0500").unwrap();
        assert_eq!(west.date(), "2023-10-03");
        assert_eq!(west.to_string(), "2023-10-02T22:30:00-05:00");
    }

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_feed_date("2023-10-02T06:00:00.123-05:00").unwrap();
        assert_eq!(ts.to_string(), "2023-10-02T06:00:00-05:00");
        assert_eq!(ts.unix(), 1_696_244_400);
        assert!(parse_feed_date("2023-10-02T06:00:00+0x:00").is_none());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_feed_date("").is_none());
        assert!(parse_feed_date("gestern").is_none());
        assert!(parse_feed_date("Mon, 32 Oct 2023 06:00:00 +0200").is_none());
        assert!(parse_feed_date("Mon, 02 Foo 2023 06:00:00 +0200").is_none());
    }

    #[test]
    fn test_ordering_by_instant() {
        let earlier = parse_feed_date("Mon, 02 Oct 2023 06:00:00 +0200").unwrap();
        let later = parse_feed_date("Mon, 02 Oct 2023 05:00:00 +0000").unwrap();
        assert!(earlier < later);
        assert!(Some(earlier) > None);
    }

    #[test]
    fn test_from_unix_keeps_offset() {
        let ts = Timestamp::from_unix(1_696_219_200, 7200);
        assert_eq!(ts.to_string(), "2023-10-02T06:00:00+02:00");
        assert_eq!(ts, parse_feed_date("Mon, 02 Oct 2023 06:00:00 +0200").unwrap());
        assert_eq!(Timestamp::from_unix(-1, 0).date(), "1969-12-31");
    }

    #[test]
    fn test_from_system_time() {
        let time = UNIX_EPOCH + Duration::from_secs(1_696_219_200);
        let ts = Timestamp::from_system_time(time);
        assert_eq!(ts.to_string(), "2023-10-02T04:00:00Z");
        assert_eq!(Timestamp::from_system_time(UNIX_EPOCH).date(), "1970-01-01");
    }
}
