use crate::feed::fetcher::{FeedFetcher, FetchError};
use crate::feed::post::Post;
use futures::future::join_all;

/// Fetches every subscription concurrently and merges the posts newest first.
///
/// A feed that fails (network, HTTP status, timeout, parse) contributes no
/// posts; the failure is logged and never reaches the caller. An empty URL
/// list returns immediately without touching the network.
///
/// All fetches run at once and are awaited jointly, so the call takes as long
/// as the slowest feed. Each fetch owns its result; merging happens only after
/// every fetch has settled.
pub async fn aggregate_all(fetcher: &FeedFetcher, urls: &[String]) -> Vec<Post> {
    if urls.is_empty() {
        return Vec::new();
    }

    let fetches = urls.iter().map(|url| async move {
        match fetcher.fetch(url).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!(feed = %url, error = %e, "Error fetching feed, skipping");
                Vec::new()
            }
        }
    });

    // join_all yields results in input order, so the merge is deterministic
    let mut posts: Vec<Post> = join_all(fetches).await.into_iter().flatten().collect();
    sort_newest_first(&mut posts);

    tracing::info!(feeds = urls.len(), posts = posts.len(), "Aggregated feeds");
    posts
}

/// Fetches a single candidate feed, surfacing any error to the caller.
///
/// Used to vet a URL before it is subscribed; unlike [`aggregate_all`],
/// failures are not swallowed so the caller can reject the subscription.
pub async fn test_one(fetcher: &FeedFetcher, url: &str) -> Result<Vec<Post>, FetchError> {
    fetcher.fetch(url).await.inspect_err(|e| {
        tracing::info!(feed = %url, error = %e, "Feed test failed");
    })
}

/// Stable sort by date, newest first. Posts with equal dates keep their order.
///
/// Undated posts go last, even behind posts dated before the epoch.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| (!b.is_undated(), b.date).cmp(&(!a.is_undated(), a.date)));
}
