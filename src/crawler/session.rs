//! Crawl session - link discovery orchestration
//!
//! A [`CrawlSession`] owns everything one crawl needs: the scope anchored at
//! the seed, the blacklist, the discovered and visited sets, the time budget
//! and the fetcher. Pages are fetched one at a time, in the order their
//! links were discovered, until no unvisited link remains or the budget
//! runs out.

use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::output::CrawlStats;
use crate::url::{Blacklist, BlacklistMode, Scope, DEFAULT_BLACKLIST};
use crate::SweepError;
use std::time::{Duration, Instant};

/// User agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("sumi-sweep/", env!("CARGO_PKG_VERSION"));

/// Slack subtracted from the budget so the crawl stops before it expires
const TIMEOUT_MARGIN: Duration = Duration::from_secs(1);

/// State of one same-host crawl
///
/// # Lifecycle
///
/// 1. Construct with [`CrawlSession::new`] (or [`CrawlSession::with_fetcher`]);
///    the default blacklist and user agent are installed and no time budget
///    is set
/// 2. Optionally reconfigure the blacklist, user agent and timeout
/// 3. Run [`CrawlSession::crawl`]
/// 4. Read the results with [`CrawlSession::links`]
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use sumi_sweep::CrawlSession;
///
/// # async fn example() -> sumi_sweep::Result<()> {
/// let mut session = CrawlSession::new()?;
/// session.set_timeout(Some(Duration::from_secs(60)));
/// session.crawl("https://example.com").await;
///
/// for link in session.links() {
///     println!("{}", link);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CrawlSession<F: Fetch = HttpFetcher> {
    scope: Scope,
    blacklist: Blacklist,
    frontier: Frontier,
    user_agent: String,
    timeout: Option<Duration>,
    started_at: Option<Instant>,
    fetcher: F,
    stats: CrawlStats,
}

impl CrawlSession<HttpFetcher> {
    /// Creates a session that fetches over HTTP
    pub fn new() -> Result<Self, SweepError> {
        Self::with_fetcher(HttpFetcher::new(DEFAULT_USER_AGENT)?)
    }
}

impl<F: Fetch> CrawlSession<F> {
    /// Creates a session that fetches through `fetcher`
    pub fn with_fetcher(mut fetcher: F) -> Result<Self, SweepError> {
        fetcher.set_user_agent(DEFAULT_USER_AGENT)?;

        Ok(Self {
            scope: Scope::default(),
            blacklist: Blacklist::new(DEFAULT_BLACKLIST.iter().copied())?,
            frontier: Frontier::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            started_at: None,
            fetcher,
            stats: CrawlStats::default(),
        })
    }

    /// Anchors the scope at `url`
    ///
    /// [`CrawlSession::crawl`] does this with its seed, so calling it
    /// directly is only useful for checking links against a scope.
    pub fn set_base_url(&mut self, url: &str) {
        self.scope = Scope::new(url);
    }

    /// The scope anchor, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.scope.base_url()
    }

    /// The host links are compared against
    pub fn host(&self) -> Option<&str> {
        self.scope.host()
    }

    /// Replaces or extends the blacklist
    pub fn set_blacklist<I, S>(&mut self, entries: I, mode: BlacklistMode) -> Result<(), SweepError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist.set(entries, mode)?;
        Ok(())
    }

    /// Appends a single blacklist entry
    pub fn add_blacklist_entry(&mut self, entry: &str) -> Result<(), SweepError> {
        self.blacklist.push(entry)?;
        Ok(())
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Sets the user agent sent on every fetch
    pub fn set_user_agent(&mut self, user_agent: &str) -> Result<(), SweepError> {
        self.fetcher.set_user_agent(user_agent)?;
        self.user_agent = user_agent.to_string();
        Ok(())
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sets the wall-clock budget; `None` lets the crawl run to exhaustion
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Discovered links in the order they were found
    pub fn links(&self) -> impl Iterator<Item = &str> + '_ {
        self.frontier.links()
    }

    /// Returns true if `url` has already been fetched in this crawl
    pub fn is_visited(&self, url: &str) -> bool {
        self.frontier.is_visited(url)
    }

    /// Statistics of the most recent crawl
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Decides whether a resolved link joins the discovered set
    ///
    /// # Rejection Rules (checked in order)
    ///
    /// 1. The link is external
    /// 2. The link matches the blacklist
    /// 3. The link does not contain the base URL
    /// 4. The link has already been discovered
    pub fn should_be_indexed(&self, link: &str) -> bool {
        if self.scope.is_external(link) {
            tracing::trace!("Skipping {}: external", link);
            return false;
        }

        if self.blacklist.matches(link) {
            tracing::trace!("Skipping {}: blacklisted", link);
            return false;
        }

        if !self.scope.contains(link) {
            tracing::trace!("Skipping {}: outside {}", link, self.scope.base_url());
            return false;
        }

        if self.frontier.is_discovered(link) {
            tracing::trace!("Skipping {}: already discovered", link);
            return false;
        }

        true
    }

    /// Returns true once the time budget, minus a one-second margin, is spent
    ///
    /// Always false without a timeout or before a crawl has started.
    pub fn should_return_before_timeout(&self) -> bool {
        match (self.timeout, self.started_at) {
            (Some(timeout), Some(started_at)) => {
                started_at.elapsed() >= timeout.saturating_sub(TIMEOUT_MARGIN)
            }
            _ => false,
        }
    }

    /// Crawls every in-scope page reachable from `seed`
    ///
    /// # Crawl Flow
    ///
    /// 1. Anchor the scope at `seed`, reset the link sets and start the clock
    /// 2. Fetch the seed and index its links
    /// 3. Walk the discovered links in the order they were found, fetching
    ///    each unvisited one and appending its new links to the end
    /// 4. Stop when no link is left or the time budget is spent
    ///
    /// Links are fetched in discovery order, so a sibling listed by an
    /// ancestor comes before the children of the current page.
    ///
    /// Faults never escape: unreachable pages and broken markup simply
    /// contribute no links.
    pub async fn crawl(&mut self, seed: &str) -> CrawlStats {
        self.set_base_url(seed);
        self.frontier.clear();
        self.stats = CrawlStats::new(seed);

        let started_at = Instant::now();
        self.started_at = Some(started_at);

        tracing::info!(
            "Starting crawl of {} (timeout: {})",
            seed,
            self.timeout
                .map(|t| format!("{}s", t.as_secs()))
                .unwrap_or_else(|| "none".to_string())
        );

        // A seed with a trailing slash and its trimmed base are the same page
        self.frontier.mark_visited(self.scope.base_url());
        self.visit(seed).await;

        // Discovered links double as the work queue, consumed in insertion order
        let mut next = 0;
        while let Some(url) = self.frontier.get(next).map(str::to_string) {
            next += 1;
            if self.frontier.is_visited(&url) {
                continue;
            }

            if self.should_return_before_timeout() {
                tracing::info!(
                    "Time budget spent, stopping with {} links queued",
                    self.frontier.len() - next + 1
                );
                self.stats.timed_out = true;
                break;
            }

            self.visit(&url).await;
        }

        self.stats.links_discovered = self.frontier.len() as u64;
        self.stats.elapsed = started_at.elapsed();

        tracing::info!(
            "Crawl of {} finished: {} links discovered, {} pages fetched in {:?}",
            seed,
            self.stats.links_discovered,
            self.stats.pages_fetched,
            self.stats.elapsed
        );

        self.stats.clone()
    }

    /// Fetches one page and indexes its links
    async fn visit(&mut self, url: &str) {
        let links_before = self.frontier.len();

        let body = self.fetcher.fetch(url).await;
        self.stats.pages_fetched += 1;
        if body.is_empty() {
            self.stats.empty_responses += 1;
        }

        for raw in extract_links(&body) {
            let link = self.scope.resolve(&raw, &self.blacklist);
            if self.should_be_indexed(&link) {
                self.frontier.discover(link);
            }
        }

        self.frontier.mark_visited(url);
        tracing::debug!(
            "Processed {}: {} new links",
            url,
            self.frontier.len() - links_before
        );
    }
}
