use super::date::parse_date;
use super::document::{Element, FeedDocument};
use super::html::reduce;
use super::post::{title_or_default, Post};
use chrono::DateTime;

/// Maps every `<entry>` of an Atom document to a [`Post`], in document order.
pub fn extract(doc: &FeedDocument, feed_url: &str) -> Vec<Post> {
    doc.elements_named("entry")
        .into_iter()
        .map(|entry| extract_entry(entry, feed_url))
        .collect()
}

fn extract_entry(entry: &Element, feed_url: &str) -> Post {
    let content = entry.child_text("content");
    let source = if content.is_empty() {
        entry.child_text("summary")
    } else {
        content
    };

    // `updated` first, then `published`; whichever parses first wins
    let date = ["updated", "published"]
        .into_iter()
        .find_map(|name| parse_date(&entry.child_text(name)))
        .unwrap_or(DateTime::UNIX_EPOCH);

    Post {
        title: title_or_default(entry.child_text("title")),
        link: resolve_link(entry, feed_url),
        description: reduce(&source).trim().to_string(),
        date,
        feed_url: feed_url.to_string(),
    }
}

/// Picks the post URL from the entry's `<link>` elements.
///
/// `rel="related"` wins: some publishers (link blogs) point `alternate` at the
/// external page they discuss and use `related` for their own post. After that
/// the first `alternate` or rel-less link, then the first link of any kind.
/// Falls back to the feed URL when no usable `href` exists.
fn resolve_link(entry: &Element, feed_url: &str) -> String {
    let links: Vec<&Element> = entry.children_named("link").collect();

    let chosen = links
        .iter()
        .find(|link| link.attr("rel") == Some("related"))
        .or_else(|| {
            links
                .iter()
                .find(|link| matches!(link.attr("rel"), None | Some("alternate")))
        })
        .or_else(|| links.first());

    chosen
        .and_then(|link| link.attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .unwrap_or(feed_url)
        .to_string()
}
