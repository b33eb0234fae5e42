use crate::config::Config;
use crate::feed::document::{self, FeedKind, ParseError};
use crate::feed::post::Post;
use crate::feed::{atom, rss};
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching and normalizing one feed.
///
/// Network failures (never reached the server) are kept apart from HTTP
/// status failures (the server answered, but not with 2xx).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, invalid URL, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    /// Request plus body read exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the configured size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Body was not a well-formed feed document
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Retrieves feed documents over HTTP and normalizes them into [`Post`]s.
///
/// Holds one `reqwest::Client`; clones share its connection pool.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
    timeout: Option<Duration>,
    max_bytes: usize,
}

impl FeedFetcher {
    /// Builds a fetcher from the timeout, size limit and user agent in `config`.
    ///
    /// A `request_timeout_secs` of 0 disables the per-fetch timeout.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            timeout: (config.request_timeout_secs > 0)
                .then_some(Duration::from_secs(config.request_timeout_secs)),
            max_bytes: config.max_feed_bytes,
        })
    }

    /// Fetches one feed and returns its posts in document order.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] - Connection, TLS or URL errors
    /// - [`FetchError::HttpStatus`] - Non-2xx HTTP response
    /// - [`FetchError::Timeout`] - The whole fetch exceeded the configured timeout
    /// - [`FetchError::ResponseTooLarge`] - Body exceeded the size limit
    /// - [`FetchError::Parse`] - Body was not well-formed XML
    ///
    /// No retries are attempted; the caller decides what a failure means.
    pub async fn fetch(&self, url: &str) -> Result<Vec<Post>, FetchError> {
        let body = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.download(url))
                .await
                .map_err(|_| FetchError::Timeout)??,
            None => self.download(url).await?,
        };

        let posts = normalize(&body, url)?;
        tracing::debug!(feed = %url, posts = posts.len(), "Fetched feed");
        Ok(posts)
    }

    async fn download(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, self.max_bytes).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Parses raw feed text and maps it to posts with the extractor for its format.
///
/// This is the network-free half of [`FeedFetcher::fetch`].
pub fn normalize(raw: &str, feed_url: &str) -> Result<Vec<Post>, ParseError> {
    let doc = document::parse(raw)?;
    let posts = match doc.kind() {
        FeedKind::Atom => atom::extract(&doc, feed_url),
        FeedKind::Rss => rss::extract(&doc, feed_url),
    };
    Ok(posts)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
