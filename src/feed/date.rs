use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive layouts some publishers emit instead of RFC 2822 / RFC 3339; read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// ISO 8601 with a numeric offset that RFC 3339 rejects, e.g. `+0000`.
const OFFSET_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Zone names chrono's RFC 2822 parser does not know, all meaning UTC.
const UTC_ZONE_NAMES: &[&str] = &["UTC", "Z"];

/// Parses a feed timestamp, returning `None` when no known layout matches.
///
/// RSS `pubDate` is nominally RFC 2822 and Atom dates RFC 3339, but both
/// show up in either format in the wild, so every layout is tried for both.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(date) = parse_lenient_rfc2822(text) {
        return Some(date);
    }
    if let Ok(date) = DateTime::parse_from_str(text, OFFSET_DATETIME_FORMAT) {
        return Some(date.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// RFC 2822 as publishers actually write it: the weekday is dropped, since it
/// is often wrong, and `UTC`/`Z` are read as `+0000`.
fn parse_lenient_rfc2822(text: &str) -> Option<DateTime<Utc>> {
    let rest = match text.split_once(',') {
        Some((day, rest)) if day.trim().chars().all(|c| c.is_ascii_alphabetic()) => rest.trim(),
        _ => text,
    };

    let normalized = match rest.rsplit_once(char::is_whitespace) {
        Some((head, zone)) if UTC_ZONE_NAMES.iter().any(|z| zone.eq_ignore_ascii_case(z)) => {
            format!("{} +0000", head)
        }
        _ => rest.to_string(),
    };

    DateTime::parse_from_rfc2822(&normalized)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// [`parse_date`] with the epoch as the fallback, so undated posts sort last.
pub fn parse_date_or_epoch(text: &str) -> DateTime<Utc> {
    parse_date(text).unwrap_or(DateTime::UNIX_EPOCH)
}
