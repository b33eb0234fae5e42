use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to posts whose source omits one or leaves it blank.
pub const UNTITLED: &str = "Untitled";

/// A single post, normalized from either an RSS item or an Atom entry.
///
/// Every field is populated by the extractors; missing source data is
/// replaced by a default rather than left out. Serialized with camelCase keys
/// (`feedUrl`) and an RFC 3339 `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Never empty; [`UNTITLED`] when the source has no title.
    pub title: String,
    /// Canonical destination of the post, or the feed URL when none was found.
    pub link: String,
    /// Plain text with markup stripped. May be empty.
    pub description: String,
    /// Publication time; the Unix epoch when absent or unparseable.
    pub date: DateTime<Utc>,
    /// Subscription URL the post was fetched from.
    pub feed_url: String,
}

impl Post {
    /// Whether the source gave no usable date.
    pub fn is_undated(&self) -> bool {
        self.date == DateTime::UNIX_EPOCH
    }
}

/// Title text with the [`UNTITLED`] default applied.
pub(crate) fn title_or_default(title: String) -> String {
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}
