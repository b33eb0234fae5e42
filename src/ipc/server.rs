use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::protocol::{FeedsResponse, Request, Response, TestResponse};
use crate::feed::{aggregate_all, test_one, FeedFetcher};
use crate::storage::SubscriptionStore;

/// Answers boundary requests against one subscription store and fetcher.
#[derive(Debug, Clone)]
pub struct Handler {
    store: SubscriptionStore,
    fetcher: FeedFetcher,
}

impl Handler {
    pub fn new(store: SubscriptionStore, fetcher: FeedFetcher) -> Self {
        Self { store, fetcher }
    }

    /// Dispatches one request. Never fails: errors become part of the response.
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::FetchFeeds => Response::Feeds(self.fetch_feeds().await),
            Request::TestFeed { url } => Response::Test(match test_one(&self.fetcher, &url).await {
                Ok(posts) => TestResponse::success(posts),
                Err(e) => TestResponse::failure(e.to_string()),
            }),
        }
    }

    /// Decodes and dispatches one JSON request line.
    pub async fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed request");
                Response::Test(TestResponse::failure(format!("invalid request: {}", e)))
            }
        }
    }

    async fn fetch_feeds(&self) -> FeedsResponse {
        match self.store.get().await {
            Ok(urls) => FeedsResponse {
                posts: aggregate_all(&self.fetcher, &urls).await,
                error: None,
            },
            Err(e) => {
                tracing::error!(error = %e, "Error reading subscriptions");
                FeedsResponse {
                    posts: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Serves newline-delimited JSON requests from `reader`, one response line each.
///
/// Requests are answered in order. Blank lines are skipped. Returns when the
/// reader reaches end of input.
pub async fn serve<R, W>(handler: &Handler, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handler.handle_line(&line).await;
        let mut encoded = serde_json::to_vec(&response).map_err(std::io::Error::other)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }

    tracing::debug!("Request stream closed");
    Ok(())
}
