//! Adding and removing subscriptions.
//!
//! A candidate URL is validated, test-fetched and checked for duplicates
//! before it is persisted, so the store only ever holds feeds that worked
//! at least once.

use crate::feed::{test_one, FeedFetcher, FetchError};
use crate::storage::{StoreError, SubscriptionStore};
use crate::util::validate_url;
use thiserror::Error;

/// Why a candidate subscription was rejected. Messages are shown to the user as-is.
#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("Please enter a feed URL")]
    EmptyUrl,

    #[error("Please enter a valid URL")]
    InvalidUrl,

    #[error("Already subscribed to this feed")]
    AlreadySubscribed,

    #[error("Error: {0}")]
    Feed(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Subscribes to `url` after confirming it yields a parseable feed.
///
/// Returns the number of posts the feed currently carries.
pub async fn subscribe(
    store: &SubscriptionStore,
    fetcher: &FeedFetcher,
    url: &str,
) -> Result<usize, SubscribeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SubscribeError::EmptyUrl);
    }
    if let Err(e) = validate_url(url) {
        tracing::debug!(url = %url, error = %e, "Rejected subscription URL");
        return Err(SubscribeError::InvalidUrl);
    }

    let posts = test_one(fetcher, url).await?;

    let mut feeds = store.get().await?;
    if feeds.iter().any(|existing| existing == url) {
        return Err(SubscribeError::AlreadySubscribed);
    }
    feeds.push(url.to_string());
    store.set(&feeds).await?;

    tracing::info!(feed = %url, posts = posts.len(), "Subscribed");
    Ok(posts.len())
}

/// Removes every entry equal to `url`. Returns whether anything was removed.
pub async fn unsubscribe(store: &SubscriptionStore, url: &str) -> Result<bool, StoreError> {
    let feeds = store.get().await?;
    let remaining: Vec<String> = feeds
        .iter()
        .filter(|existing| existing.as_str() != url)
        .cloned()
        .collect();

    if remaining.len() == feeds.len() {
        return Ok(false);
    }

    store.set(&remaining).await?;
    tracing::info!(feed = %url, "Unsubscribed");
    Ok(true)
}
