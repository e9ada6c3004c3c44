//! Crawler module for same-host link discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching that degrades failures to empty bodies
//! - HTML link extraction
//! - Discovered/visited bookkeeping
//! - The crawl session driving the traversal

mod fetcher;
mod frontier;
mod parser;
mod session;

pub use fetcher::{build_http_client, Fetch, HttpFetcher, MAX_REDIRECTS, REQUEST_TIMEOUT};
pub use frontier::Frontier;
pub use parser::extract_links;
pub use session::{CrawlSession, DEFAULT_USER_AGENT};

use crate::config::Config;
use crate::output::CrawlStats;
use crate::SweepError;

/// Runs a complete crawl described by a configuration
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build an HTTP-backed session
/// 2. Apply the configured user agent, timeout and blacklist
/// 3. Crawl from the configured seed
///
/// # Returns
///
/// * `Ok((links, stats))` - Discovered links in order, and run statistics
/// * `Err(SweepError)` - The session could not be set up
pub async fn crawl(config: &Config) -> Result<(Vec<String>, CrawlStats), SweepError> {
    let mut session = CrawlSession::new()?;
    config.apply_to(&mut session)?;

    let stats = session.crawl(&config.crawler.seed_url).await;
    Ok((session.links().map(str::to_string).collect(), stats))
}
