//! Integration tests for batch aggregation: concurrent fetch, per-feed
//! failure isolation and newest-first ordering.
//!
//! Each test serves its feeds from its own wiremock server.

use chrono::{DateTime, TimeZone, Utc};
use feedreel::config::Config;
use feedreel::feed::{aggregate_all, normalize, sort_newest_first, test_one, FeedFetcher, FetchError};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RSS_FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>RSS</title>
    <item><title>rss-new</title><link>https://r/1</link><pubDate>Wed, 03 Jan 2024 10:00:00 GMT</pubDate></item>
    <item><title>rss-old</title><link>https://r/2</link><pubDate>Mon, 01 Jan 2024 10:00:00 GMT</pubDate></item>
    <item><title>rss-undated</title><link>https://r/3</link></item>
</channel></rss>"#;

const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom"><title>Atom</title>
    <entry><title>atom-mid</title><link href="https://b/1"/><updated>2024-01-02T10:00:00Z</updated></entry>
    <entry><title>atom-newest</title><link href="https://b/2"/><updated>2024-01-04T10:00:00Z</updated></entry>
</feed>"#;

fn fetcher() -> FeedFetcher {
    FeedFetcher::new(&Config::default()).unwrap()
}

async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

fn titles(posts: &[feedreel::feed::Post]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn test_failing_feed_contributes_nothing() {
    let server = MockServer::start().await;
    mount(&server, "/rss", ResponseTemplate::new(200).set_body_string(RSS_FEED)).await;
    mount(&server, "/atom", ResponseTemplate::new(200).set_body_string(ATOM_FEED)).await;
    mount(&server, "/broken", ResponseTemplate::new(500)).await;

    let rss_url = format!("{}/rss", server.uri());
    let atom_url = format!("{}/atom", server.uri());
    let urls = vec![rss_url.clone(), format!("{}/broken", server.uri()), atom_url.clone()];

    let posts = aggregate_all(&fetcher(), &urls).await;

    let mut expected = normalize(RSS_FEED, &rss_url).unwrap();
    expected.extend(normalize(ATOM_FEED, &atom_url).unwrap());
    sort_newest_first(&mut expected);

    assert_eq!(posts, expected);
    assert_eq!(
        titles(&posts),
        vec!["atom-newest", "rss-new", "atom-mid", "rss-old", "rss-undated"]
    );
}

#[tokio::test]
async fn test_posts_keep_their_source_feed_url() {
    let server = MockServer::start().await;
    mount(&server, "/rss", ResponseTemplate::new(200).set_body_string(RSS_FEED)).await;
    mount(&server, "/atom", ResponseTemplate::new(200).set_body_string(ATOM_FEED)).await;
    let rss_url = format!("{}/rss", server.uri());
    let atom_url = format!("{}/atom", server.uri());

    let posts = aggregate_all(&fetcher(), &[rss_url.clone(), atom_url.clone()]).await;

    for post in &posts {
        let expected = if post.title.starts_with("rss") { &rss_url } else { &atom_url };
        assert_eq!(&post.feed_url, expected);
    }
}

#[tokio::test]
async fn test_every_kind_of_failure_is_absorbed() {
    let server = MockServer::start().await;
    mount(&server, "/missing", ResponseTemplate::new(404)).await;
    mount(&server, "/garbage", ResponseTemplate::new(200).set_body_string("<html><body>")).await;
    let urls = vec![
        format!("{}/missing", server.uri()),
        format!("{}/garbage", server.uri()),
        "http://127.0.0.1:1/unreachable".to_string(),
        "not even a url".to_string(),
    ];

    let posts = aggregate_all(&fetcher(), &urls).await;
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_empty_subscription_list_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string(RSS_FEED))
        .expect(0)
        .mount(&server)
        .await;

    let posts = aggregate_all(&fetcher(), &[]).await;
    assert!(posts.is_empty());
    // expect(0) is verified when the server drops
}

#[tokio::test]
async fn test_equal_dates_keep_concatenation_order() {
    let same_day = |titles: [&str; 2]| {
        format!(
            r#"<rss><channel>
                <item><title>{}</title><pubDate>Fri, 05 Jan 2024 00:00:00 GMT</pubDate></item>
                <item><title>{}</title><pubDate>Fri, 05 Jan 2024 00:00:00 GMT</pubDate></item>
            </channel></rss>"#,
            titles[0], titles[1]
        )
    };
    let server = MockServer::start().await;
    mount(&server, "/one", ResponseTemplate::new(200).set_body_string(same_day(["a1", "a2"]))).await;
    mount(&server, "/two", ResponseTemplate::new(200).set_body_string(same_day(["b1", "b2"]))).await;

    let urls = vec![format!("{}/one", server.uri()), format!("{}/two", server.uri())];
    let posts = aggregate_all(&fetcher(), &urls).await;

    assert_eq!(titles(&posts), vec!["a1", "a2", "b1", "b2"]);
    assert!(posts
        .iter()
        .all(|p| p.date == Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()));
}

#[tokio::test]
async fn test_feeds_are_fetched_concurrently() {
    let server = MockServer::start().await;
    for route in ["/a", "/b", "/c"] {
        mount(
            &server,
            route,
            ResponseTemplate::new(200)
                .set_body_string(RSS_FEED)
                .set_delay(Duration::from_millis(800)),
        )
        .await;
    }
    let urls: Vec<String> = ["/a", "/b", "/c"]
        .iter()
        .map(|route| format!("{}{}", server.uri(), route))
        .collect();

    let started = Instant::now();
    let posts = aggregate_all(&fetcher(), &urls).await;

    assert_eq!(posts.len(), 9);
    // Sequential fetching would need at least 2.4s
    assert!(started.elapsed() < Duration::from_millis(2000));
}

#[tokio::test]
async fn test_hung_feed_times_out_without_blocking_others() {
    let server = MockServer::start().await;
    mount(&server, "/rss", ResponseTemplate::new(200).set_body_string(RSS_FEED)).await;
    mount(
        &server,
        "/hung",
        ResponseTemplate::new(200)
            .set_body_string(ATOM_FEED)
            .set_delay(Duration::from_secs(5)),
    )
    .await;
    let config = Config {
        request_timeout_secs: 1,
        ..Config::default()
    };
    let fetcher = FeedFetcher::new(&config).unwrap();

    let urls = vec![format!("{}/hung", server.uri()), format!("{}/rss", server.uri())];
    let posts = aggregate_all(&fetcher, &urls).await;

    assert_eq!(titles(&posts), vec!["rss-new", "rss-old", "rss-undated"]);
    assert_eq!(posts.last().unwrap().date, DateTime::UNIX_EPOCH);
}

#[tokio::test]
async fn test_single_feed_test_surfaces_errors() {
    let server = MockServer::start().await;
    mount(&server, "/ok", ResponseTemplate::new(200).set_body_string(ATOM_FEED)).await;
    mount(&server, "/gone", ResponseTemplate::new(410)).await;
    mount(&server, "/html", ResponseTemplate::new(200).set_body_string("<p>a</p><p>b</p>")).await;

    let posts = test_one(&fetcher(), &format!("{}/ok", server.uri())).await.unwrap();
    assert_eq!(titles(&posts), vec!["atom-mid", "atom-newest"]);

    let gone = test_one(&fetcher(), &format!("{}/gone", server.uri())).await;
    assert!(matches!(gone, Err(FetchError::HttpStatus(410))));

    let html = test_one(&fetcher(), &format!("{}/html", server.uri())).await;
    assert!(matches!(html, Err(FetchError::Parse(_))));
}
