//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl:
//! run information, statistics and the discovered links.

use crate::output::CrawlSummary;
use crate::OutputError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of `summary` to `output_path`
pub fn generate_markdown_summary(
    summary: &CrawlSummary,
    output_path: &Path,
) -> Result<(), OutputError> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let stats = &summary.stats;
    let mut md = String::new();

    md.push_str("# Sumi-Sweep Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", stats.seed_url));
    md.push_str(&format!(
        "- **Started**: {}\n",
        summary.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        summary.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        stats.elapsed.as_secs_f64()
    ));
    md.push_str(&format!(
        "- **Status**: {}\n",
        if stats.timed_out {
            "Stopped by time budget"
        } else {
            "Completed"
        }
    ));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Statistics
    md.push_str("## Statistics\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Links Discovered | {} |\n", stats.links_discovered));
    md.push_str(&format!("| Pages Fetched | {} |\n", stats.pages_fetched));
    md.push_str(&format!("| Empty Responses | {} |\n", stats.empty_responses));
    md.push_str(&format!("| Success Rate | {:.2}% |\n", stats.success_rate()));
    md.push_str(&format!(
        "| Pages/sec | {:.2} |\n\n",
        stats.pages_per_second()
    ));

    // Links
    md.push_str(&format!("## Discovered Links ({})\n\n", summary.links.len()));
    if summary.links.is_empty() {
        md.push_str("_No links discovered._\n");
    } else {
        for link in &summary.links {
            md.push_str(&format!("- <{}>\n", link));
        }
    }

    md
}
