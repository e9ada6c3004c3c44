//! Output module for crawl results
//!
//! This module handles:
//! - Recording crawl statistics
//! - Writing the discovered links as a plain list
//! - Generating markdown summaries of a run

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, CrawlStats};

use crate::OutputError;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Everything known about a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub stats: CrawlStats,
    /// Discovered links in insertion order
    pub links: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// SHA-256 of the configuration file the run used, if any
    pub config_hash: Option<String>,
}

/// Writes one link per line to `path`
///
/// # Arguments
///
/// * `links` - Links in the order they should appear
/// * `path` - Destination file, created or truncated
pub fn write_links(links: &[String], path: &Path) -> Result<(), OutputError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for link in links {
        writeln!(writer, "{}", link)?;
    }
    writer.flush()?;
    Ok(())
}
