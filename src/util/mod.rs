//! Utility functions for common operations.
//!
//! This module provides reusable utilities for:
//!
//! - **URL validation**: Checking that a candidate subscription is fetchable
//! - **Text processing**: Terminal-safe, width-aware rendering of feed text
//!
//! # Examples
//!
//! ```
//! use feedreel::util::{validate_url, display_width, truncate_to_width};
//!
//! let url = validate_url("https://example.com/feed.xml").unwrap();
//! assert_eq!(display_width("Hello"), 5);
//! assert_eq!(truncate_to_width("Long article title", 10), "Long ar...");
//! ```

mod text;
mod url_validator;

pub use text::{collapse_whitespace, display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url, UrlValidationError};
