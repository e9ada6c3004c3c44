//! Crawl statistics
//!
//! Counters collected by a crawl session while it runs, and a printer for
//! showing them at the end of a CLI run.

use std::time::Duration;

/// Statistics for one crawl
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStats {
    /// The seed the crawl started from
    pub seed_url: String,

    /// Number of fetches performed, including the seed
    pub pages_fetched: u64,

    /// Fetches that came back empty (transport errors, error statuses, empty pages)
    pub empty_responses: u64,

    /// Number of links in the discovered set when the crawl ended
    pub links_discovered: u64,

    /// Wall-clock time spent crawling
    pub elapsed: Duration,

    /// Whether the time budget stopped the crawl
    pub timed_out: bool,
}

impl CrawlStats {
    /// Creates empty statistics for a crawl starting at `seed_url`
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            ..Self::default()
        }
    }

    /// Fetch throughput over the whole crawl
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages_fetched as f64 / secs
        } else {
            0.0
        }
    }

    /// Percentage of fetches that returned a non-empty body
    pub fn success_rate(&self) -> f64 {
        if self.pages_fetched == 0 {
            return 0.0;
        }
        let successes = self.pages_fetched.saturating_sub(self.empty_responses);
        (successes as f64 / self.pages_fetched as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Seed: {}", stats.seed_url);
    println!("  Links discovered: {}", stats.links_discovered);
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!(
        "  Empty responses: {} ({:.1}% success)",
        stats.empty_responses,
        stats.success_rate()
    );
    println!(
        "  Elapsed: {:.2}s ({:.2} pages/sec)",
        stats.elapsed.as_secs_f64(),
        stats.pages_per_second()
    );
    if stats.timed_out {
        println!("  Stopped early: time budget spent");
    }
}
