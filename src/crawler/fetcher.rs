//! HTTP fetcher implementation
//!
//! This module turns URLs into document bodies for the crawler:
//! - Building HTTP clients with the configured user agent
//! - GET requests with redirect following
//! - Degrading every failure to an empty body

use crate::SweepError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum number of redirects followed for a single fetch
pub const MAX_REDIRECTS: usize = 10;

/// Transport-level timeout, distinct from the crawl's wall-clock budget
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Retrieves document bodies for the crawler
///
/// Implementations must never fail: any problem reaching `url` is reported
/// as an empty body, which simply yields no links for that page.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches `url` and returns its body, or an empty string on failure
    async fn fetch(&self, url: &str) -> String;

    /// Changes the user agent sent on subsequent fetches
    ///
    /// Transports that do not send a user agent can keep the default no-op.
    fn set_user_agent(&mut self, user_agent: &str) -> Result<(), SweepError> {
        let _ = user_agent;
        Ok(())
    }
}

/// Builds an HTTP client for crawling
///
/// # Client Settings
///
/// | Setting | Value |
/// |---------|-------|
/// | User agent | `user_agent` |
/// | TLS certificate verification | Disabled |
/// | Redirects | Followed, at most 10 hops |
/// | Connect timeout | 60s |
/// | Request timeout | 60s |
///
/// # Example
///
/// ```no_run
/// use sumi_sweep::crawler::build_http_client;
///
/// let client = build_http_client("sumi-sweep/1.0").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .danger_accept_invalid_certs(true)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .connect_timeout(REQUEST_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetch`] implementation backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher that identifies itself as `user_agent`
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!("Request timeout for {}", url);
                } else if e.is_connect() {
                    tracing::warn!("Connection failed for {}: {}", url, e);
                } else if e.is_redirect() {
                    tracing::warn!("Too many redirects from {}", url);
                } else {
                    tracing::warn!("Request failed for {}: {}", url, e);
                }
                return String::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP {} for {}, ignoring body", status.as_u16(), url);
            return String::new();
        }

        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read body of {}: {}", url, e);
                String::new()
            }
        }
    }

    fn set_user_agent(&mut self, user_agent: &str) -> Result<(), SweepError> {
        self.client = build_http_client(user_agent)?;
        Ok(())
    }
}
