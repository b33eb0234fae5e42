//! Feed retrieval and normalization.
//!
//! Turns subscription URLs into one newest-first list of [`Post`]s:
//!
//! - **Parsing**: Raw XML into an element tree, classified as RSS or Atom
//! - **Extraction**: Per-format mapping of items/entries onto [`Post`]
//! - **Fetching**: HTTP retrieval of a single feed with typed errors
//! - **Aggregation**: Concurrent fetch of all subscriptions with per-feed failure isolation
//!
//! # Architecture
//!
//! - [`parse_document`] - XML tree building and format classification
//! - [`extract_rss`] / [`extract_atom`] - Field extraction with source-specific link and content rules
//! - [`reduce_html`] - Markup stripping shared by both extractors
//! - [`FeedFetcher`] - HTTP retrieval and dispatch to the matching extractor
//! - [`aggregate_all`] / [`test_one`] - Batch and single-feed entry points
//!
//! # Example
//!
//! ```ignore
//! use feedreel::feed::{aggregate_all, FeedFetcher};
//!
//! let fetcher = FeedFetcher::new(&config)?;
//! let posts = aggregate_all(&fetcher, &urls).await;
//! ```

mod aggregator;
mod atom;
mod date;
mod document;
mod fetcher;
mod html;
mod post;
mod rss;

pub use aggregator::{aggregate_all, sort_newest_first, test_one};
pub use atom::extract as extract_atom;
pub use date::{parse_date, parse_date_or_epoch};
pub use document::{parse as parse_document, Element, FeedDocument, FeedKind, Node, ParseError};
pub use fetcher::{normalize, FeedFetcher, FetchError};
pub use html::reduce as reduce_html;
pub use post::{Post, UNTITLED};
pub use rss::extract as extract_rss;
