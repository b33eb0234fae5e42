//! Invocation boundary for front ends running in another process.
//!
//! A front end sends `FETCH_FEEDS` to get the merged post list and
//! `TEST_FEED` to vet a URL before subscribing. Aggregate responses always
//! succeed; test responses carry an explicit success flag and error message.

mod protocol;
mod server;

pub use protocol::{FeedsResponse, Request, Response, TestResponse};
pub use server::{serve, Handler};
