use super::date::parse_date_or_epoch;
use super::document::{Element, FeedDocument};
use super::html::reduce;
use super::post::{title_or_default, Post};

/// Maps every `<item>` of an RSS document to a [`Post`], in document order.
///
/// A document without items yields an empty list.
pub fn extract(doc: &FeedDocument, feed_url: &str) -> Vec<Post> {
    doc.elements_named("item")
        .into_iter()
        .map(|item| extract_item(item, feed_url))
        .collect()
}

/// Builds one post. When `content:encoded` reduces to nothing, the fallback is
/// the reduced `description` rather than its raw markup, so descriptions stay plain text.
fn extract_item(item: &Element, feed_url: &str) -> Post {
    let description = item.child_text("description");
    let encoded = item.child_text("content:encoded");

    // Full content wins over the teaser; if it reduces to nothing (e.g. only an
    // image), the teaser still gives the reader something to preview
    let mut text = reduce(if encoded.is_empty() { &description } else { &encoded })
        .trim()
        .to_string();
    if text.is_empty() && !encoded.is_empty() {
        text = reduce(&description).trim().to_string();
    }

    Post {
        title: title_or_default(item.child_text("title")),
        link: resolve_link(item, feed_url),
        description: text,
        date: parse_date_or_epoch(&item.child_text("pubDate")),
        feed_url: feed_url.to_string(),
    }
}

/// Picks the post URL: a permalink `<guid>`, then `<link>`, then the feed itself.
///
/// A `<guid>` counts as a permalink unless it says `isPermaLink="false"`. That
/// includes a guid with no attribute at all: some publishers only put the real
/// article URL there and point `<link>` somewhere else.
fn resolve_link(item: &Element, feed_url: &str) -> String {
    if let Some(guid) = item.child("guid") {
        let text = guid.text_content().trim().to_string();
        let is_permalink = guid.attr("isPermaLink") != Some("false");
        if is_permalink && !text.is_empty() {
            return text;
        }
    }

    let link = item.child_text("link");
    if link.is_empty() {
        feed_url.to_string()
    } else {
        link
    }
}
