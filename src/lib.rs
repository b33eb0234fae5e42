//! feedreel: fetches RSS and Atom subscriptions and merges them into one
//! newest-first list of posts.
//!
//! - [`feed`] - Parsing, normalization, fetching and aggregation
//! - [`storage`] - File-backed subscription list
//! - [`subscribe`] - Vetting and persisting subscriptions
//! - [`ipc`] - JSON request/response boundary for out-of-process front ends
//! - [`display`] - Terminal rendering of posts

pub mod config;
pub mod display;
pub mod feed;
pub mod ipc;
pub mod storage;
pub mod subscribe;
pub mod util;
