//! Plain-text rendering of posts for the terminal listing.

use chrono::{DateTime, Utc};
use url::Url;

use crate::feed::Post;
use crate::util::{collapse_whitespace, strip_control_chars, truncate_to_width};

/// Age of a post relative to `now`: "Just now", "5m ago", "3h ago", "2d ago",
/// then an absolute "Jan 2, 2006". Undated posts read "Unknown date".
pub fn relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if date == DateTime::UNIX_EPOCH {
        return "Unknown date".to_string();
    }

    let elapsed = now.signed_duration_since(date);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Short source label: the feed URL's host without a leading `www.`.
///
/// Falls back to the URL itself when it has no parseable host.
pub fn source_label(feed_url: &str) -> String {
    match Url::parse(feed_url) {
        Ok(url) => match url.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => feed_url.to_string(),
        },
        Err(_) => feed_url.to_string(),
    }
}

/// One-line, terminal-safe description preview fitted to `width` columns.
pub fn preview(description: &str, width: usize) -> String {
    let text = collapse_whitespace(&strip_control_chars(description));
    if text.is_empty() {
        return "No preview available".to_string();
    }
    truncate_to_width(&text, width).into_owned()
}

/// Renders a post as a title line, a link line, a preview line and a meta line.
pub fn render_post(post: &Post, now: DateTime<Utc>, width: usize) -> String {
    format!(
        "{}\n  {}\n  {}\n  {} · {}\n",
        collapse_whitespace(&strip_control_chars(&post.title)),
        strip_control_chars(&post.link),
        preview(&post.description, width),
        relative_date(post.date, now),
        source_label(&post.feed_url),
    )
}
