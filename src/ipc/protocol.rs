//! Request/response messages exchanged with a front end.
//!
//! One JSON object per line. Requests are tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::feed::Post;

/// A call from the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// Aggregate every subscribed feed.
    FetchFeeds,
    /// Fetch one candidate feed and report whether it works.
    TestFeed { url: String },
}

/// Answer to [`Request::FetchFeeds`]. Always delivered; per-feed failures are absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedsResponse {
    pub posts: Vec<Post>,
    /// Set only when the subscription list itself could not be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Answer to [`Request::TestFeed`], or to a line that was not a valid request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestResponse {
    pub fn success(posts: Vec<Post>) -> Self {
        Self {
            success: true,
            posts: Some(posts),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            posts: None,
            error: Some(message.into()),
        }
    }
}

/// Any response line. `TestResponse` is tried first when decoding because
/// it is the only shape with a required `success` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Test(TestResponse),
    Feeds(FeedsResponse),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request: Request = serde_json::from_str(r#"{"type":"FETCH_FEEDS"}"#).unwrap();
        assert_eq!(request, Request::FetchFeeds);

        let request: Request =
            serde_json::from_str(r#"{"type":"TEST_FEED","url":"https://a/feed"}"#).unwrap();
        assert_eq!(
            request,
            Request::TestFeed {
                url: "https://a/feed".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_request_type_rejected() {
        assert!(serde_json::from_str::<Request>(r#"{"type":"DELETE_ALL"}"#).is_err());
        assert!(serde_json::from_str::<Request>(r#"{"type":"TEST_FEED"}"#).is_err());
    }

    #[test]
    fn test_post_wire_format() {
        let response = Response::Feeds(FeedsResponse {
            posts: vec![Post {
                title: "T".to_string(),
                link: "https://a/1".to_string(),
                description: "D".to_string(),
                date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
                feed_url: "https://a/feed".to_string(),
            }],
            error: None,
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "posts": [{
                    "title": "T",
                    "link": "https://a/1",
                    "description": "D",
                    "date": "2024-01-02T03:04:05Z",
                    "feedUrl": "https://a/feed"
                }]
            })
        );
    }

    #[test]
    fn test_test_response_wire_format() {
        assert_eq!(
            serde_json::to_value(Response::Test(TestResponse::failure("HTTP error! status: 404")))
                .unwrap(),
            json!({ "success": false, "error": "HTTP error! status: 404" })
        );
        assert_eq!(
            serde_json::to_value(Response::Test(TestResponse::success(Vec::new()))).unwrap(),
            json!({ "success": true, "posts": [] })
        );
    }

    #[test]
    fn test_response_decodes_to_matching_variant() {
        let feeds: Response = serde_json::from_str(r#"{"posts":[]}"#).unwrap();
        assert!(matches!(feeds, Response::Feeds(_)));

        let test: Response = serde_json::from_str(r#"{"success":true,"posts":[]}"#).unwrap();
        assert!(matches!(test, Response::Test(_)));
    }
}
