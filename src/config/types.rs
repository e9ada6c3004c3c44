use crate::crawler::{CrawlSession, Fetch};
use crate::url::BlacklistMode;
use crate::SweepError;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Sumi-Sweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub blacklist: BlacklistConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from; also anchors the crawl scope
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Wall-clock budget for the whole crawl; absent means unbounded
    #[serde(rename = "timeout-seconds", default)]
    pub timeout_seconds: Option<u64>,

    /// User agent sent on every request; absent means the built-in default
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

/// Blacklist configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlacklistConfig {
    /// Substrings that keep a link out of the index
    #[serde(default)]
    pub entries: Vec<String>,

    /// Use only `entries`, dropping the built-in defaults
    #[serde(rename = "replace-defaults", default)]
    pub replace_defaults: bool,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// File receiving the discovered links, one per line
    #[serde(rename = "links-path", default)]
    pub links_path: Option<String>,

    /// File receiving a markdown summary of the run
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

impl Config {
    /// Creates a configuration for `seed_url` with every option at its default
    pub fn for_seed(seed_url: &str) -> Self {
        Self {
            crawler: CrawlerConfig {
                seed_url: seed_url.to_string(),
                timeout_seconds: None,
                user_agent: None,
            },
            blacklist: BlacklistConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// The crawl budget as a duration
    pub fn timeout(&self) -> Option<Duration> {
        self.crawler.timeout_seconds.map(Duration::from_secs)
    }

    /// How configured blacklist entries combine with the defaults
    pub fn blacklist_mode(&self) -> BlacklistMode {
        if self.blacklist.replace_defaults {
            BlacklistMode::Replace
        } else {
            BlacklistMode::Extend
        }
    }

    /// Installs user agent, timeout and blacklist on `session`
    pub fn apply_to<F: Fetch>(&self, session: &mut CrawlSession<F>) -> Result<(), SweepError> {
        if let Some(user_agent) = &self.crawler.user_agent {
            session.set_user_agent(user_agent)?;
        }

        session.set_timeout(self.timeout());

        if self.blacklist.replace_defaults || !self.blacklist.entries.is_empty() {
            session.set_blacklist(self.blacklist.entries.iter().cloned(), self.blacklist_mode())?;
        }

        Ok(())
    }
}
