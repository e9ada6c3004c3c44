//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use std::time::{Duration, Instant};
use sumi_sweep::config::Config;
use sumi_sweep::crawler::crawl;
use sumi_sweep::{BlacklistMode, CrawlSession};
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Mounts an HTML page that must be requested exactly once
async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn links(session: &CrawlSession) -> Vec<&str> {
    session.links().collect()
}

/// Every `/page-N` links to `/page-N+1` after a fixed delay
struct ChainResponder {
    delay: Duration,
}

impl Respond for ChainResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let n: u64 = request
            .url
            .path()
            .strip_prefix("/page-")
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);

        ResponseTemplate::new(200)
            .set_body_string(format!(r#"<a href="/page-{}">next</a>"#, n + 1))
            .insert_header("content-type", "text/html")
            .set_delay(self.delay)
    }
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/",
        r#"<html><body>
            <a href="/a">A</a>
            <a href="/b">B</a>
            <a href="/c" rel="nofollow">C</a>
            <a href="http://other.com/x">External</a>
            <a href="mailto:foo@bar.com">Mail</a>
        </body></html>"#,
    )
    .await;
    mount_page(&server, "/a", r#"<a href="/b">B</a>"#).await;
    mount_page(&server, "/b", r#"<a href="/a">A</a>"#).await;

    let mut session = CrawlSession::new().expect("Failed to create session");
    let stats = session.crawl(&base_url).await;

    assert_eq!(
        links(&session),
        vec![format!("{}/a", base_url), format!("{}/b", base_url)]
    );
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(stats.empty_responses, 0);
    assert!(!stats.timed_out);
}

#[tokio::test]
async fn test_recursive_discovery() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", r#"<a href="/docs">Docs</a><a href="/blog">Blog</a>"#).await;
    mount_page(
        &server,
        "/docs",
        r#"<a href="/docs/intro">Intro</a><a href="/">Home</a>"#,
    )
    .await;
    mount_page(&server, "/blog", r#"<a href="/blog/first-post/">Post</a>"#).await;
    mount_page(
        &server,
        "/docs/intro",
        r#"<a href="/docs/intro/setup">Setup</a><a href="/blog?page=1">Blog</a>"#,
    )
    .await;
    mount_page(&server, "/blog/first-post", "<p>No links here</p>").await;
    mount_page(&server, "/docs/intro/setup", "<p>No links here</p>").await;

    let mut session = CrawlSession::new().unwrap();
    session.crawl(&base_url).await;

    // Siblings listed on earlier pages are fetched before deeper links
    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect();
    assert_eq!(
        requested,
        vec![
            "/",
            "/docs",
            "/blog",
            "/docs/intro",
            "/blog/first-post",
            "/docs/intro/setup",
        ]
    );

    assert_eq!(
        links(&session),
        vec![
            format!("{}/docs", base_url),
            format!("{}/blog", base_url),
            format!("{}/docs/intro", base_url),
            base_url.clone(),
            format!("{}/blog/first-post", base_url),
            format!("{}/docs/intro/setup", base_url),
        ]
    );
}

#[tokio::test]
async fn test_default_blacklist_excludes_links() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/",
        r#"
            <a href="/index.php?id=3">Legacy</a>
            <a href="/Index.PHP">Legacy</a>
            <a href="/manual.pdf">Manual</a>
            <a href="/storage/logo.png">Logo</a>
            <a href="/about#team">Team</a>
            <a href="tel:+123456">Call</a>
            <a href="/about">About</a>
        "#,
    )
    .await;
    mount_page(&server, "/about", r#"<a href="/index.php">Legacy</a>"#).await;

    let mut session = CrawlSession::new().unwrap();
    session.crawl(&base_url).await;

    let found = links(&session);
    assert_eq!(found, vec![format!("{}/about", base_url)]);
    assert!(found.iter().all(|link| !link.contains("index.php")));
}

#[tokio::test]
async fn test_custom_blacklist_and_user_agent() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "SweepIntegration/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/tag/rust">Tag</a><a href="/post">Post</a>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .and(header("user-agent", "SweepIntegration/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Post</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = CrawlSession::new().unwrap();
    session.set_user_agent("SweepIntegration/1.0").unwrap();
    session
        .set_blacklist(["/tag/"], BlacklistMode::Extend)
        .unwrap();
    session.crawl(&base_url).await;

    assert_eq!(links(&session), vec![format!("{}/post", base_url)]);
}

#[tokio::test]
async fn test_error_pages_contribute_no_links() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", r#"<a href="/missing">Missing</a><a href="/broken">Broken</a>"#)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"<a href="/hidden">x</a>"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = CrawlSession::new().unwrap();
    let stats = session.crawl(&base_url).await;

    assert_eq!(
        links(&session),
        vec![
            format!("{}/missing", base_url),
            format!("{}/broken", base_url)
        ]
    );
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(stats.empty_responses, 2);
}

#[tokio::test]
async fn test_timeout_bounds_crawl() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(200);

    Mock::given(method("GET"))
        .and(path_regex(r"^/(page-\d+)?$"))
        .respond_with(ChainResponder { delay })
        .mount(&server)
        .await;

    let mut session = CrawlSession::new().unwrap();
    session.set_timeout(Some(Duration::from_secs(2)));

    let started = Instant::now();
    let stats = session.crawl(&server.uri()).await;
    let elapsed = started.elapsed();

    assert!(stats.timed_out);
    assert!(
        elapsed < Duration::from_secs(2) + delay + Duration::from_millis(500),
        "crawl took {:?}",
        elapsed
    );

    // The chain never ends, so anything found is a proper subset
    let found = links(&session);
    assert!(!found.is_empty());
    assert_eq!(found.len() as u64, stats.links_discovered);
}

#[tokio::test]
async fn test_crawl_from_config() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/index.php">Legacy</a><a href="/drafts/1">Draft</a>"#,
    )
    .await;
    mount_page(&server, "/index.php", "<p>Legacy</p>").await;

    let mut config = Config::for_seed(&base_url);
    config.blacklist.entries = vec!["/drafts/".to_string()];
    config.blacklist.replace_defaults = true;
    config.crawler.timeout_seconds = Some(30);

    let (links, stats) = crawl(&config).await.unwrap();

    assert_eq!(links, vec![format!("{}/index.php", base_url)]);
    assert_eq!(stats.seed_url, base_url);
    assert_eq!(stats.pages_fetched, 2);
}

#[tokio::test]
async fn test_unreachable_seed_returns_empty() {
    let mut session = CrawlSession::new().unwrap();
    let stats = session.crawl("http://127.0.0.1:9").await;

    assert!(links(&session).is_empty());
    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.empty_responses, 1);
}
