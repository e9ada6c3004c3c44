//! Sumi-Sweep main entry point
//!
//! This is the command-line interface for the Sumi-Sweep link sweeper.

use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use sumi_sweep::config::{load_config_with_hash, validate, Config};
use sumi_sweep::crawler::crawl;
use sumi_sweep::output::{
    generate_markdown_summary, print_statistics, write_links, CrawlSummary,
};
use tracing_subscriber::EnvFilter;

/// Sumi-Sweep: a same-host link sweeper
///
/// Sumi-Sweep starts at a seed URL and follows every in-scope link on the
/// same host, printing each discovered link once, in the order it was found.
#[derive(Parser, Debug)]
#[command(name = "sumi-sweep")]
#[command(version)]
#[command(about = "A same-host link sweeper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG", required_unless_present = "seed")]
    config: Option<PathBuf>,

    /// Seed URL; overrides the configured one
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Wall-clock budget in seconds; overrides the configured one
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// User agent; overrides the configured one
    #[arg(long, value_name = "AGENT")]
    user_agent: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print crawl statistics after the links
    #[arg(long)]
    stats: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match load(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, config_hash, cli.stats).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_sweep=info,warn"),
            1 => EnvFilter::new("sumi_sweep=debug,info"),
            2 => EnvFilter::new("sumi_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the effective configuration from the config file and CLI overrides
fn load(cli: &Cli) -> Result<(Config, Option<String>), Box<dyn std::error::Error>> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => match &cli.seed {
            Some(seed) => (Config::for_seed(seed), None),
            None => return Err("either CONFIG or --seed is required".into()),
        },
    };

    if let Some(seed) = &cli.seed {
        config.crawler.seed_url = seed.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.timeout_seconds = Some(timeout);
    }
    if let Some(user_agent) = &cli.user_agent {
        config.crawler.user_agent = Some(user_agent.clone());
    }

    validate(&config)?;
    Ok((config, hash))
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Sweep Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    match config.crawler.timeout_seconds {
        Some(secs) => println!("  Timeout: {}s", secs),
        None => println!("  Timeout: none"),
    }
    println!(
        "  User agent: {}",
        config
            .crawler
            .user_agent
            .as_deref()
            .unwrap_or(sumi_sweep::crawler::DEFAULT_USER_AGENT)
    );

    println!(
        "\nBlacklist ({} entries, {}):",
        config.blacklist.entries.len(),
        if config.blacklist.replace_defaults {
            "replacing defaults"
        } else {
            "added to defaults"
        }
    );
    for entry in &config.blacklist.entries {
        println!("  - {}", entry);
    }

    println!("\nOutput:");
    println!(
        "  Links: {}",
        config.output.links_path.as_deref().unwrap_or("stdout only")
    );
    println!(
        "  Summary: {}",
        config.output.summary_path.as_deref().unwrap_or("none")
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &Config,
    config_hash: Option<String>,
    show_stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Utc::now();

    let (links, stats) = match crawl(config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    for link in &links {
        println!("{}", link);
    }

    if show_stats {
        println!();
        print_statistics(&stats);
    }

    if let Some(path) = &config.output.links_path {
        write_links(&links, Path::new(path))?;
        tracing::info!("Links written to: {}", path);
    }

    if let Some(path) = &config.output.summary_path {
        let summary = CrawlSummary {
            stats,
            links,
            started_at,
            finished_at: Utc::now(),
            config_hash,
        };
        generate_markdown_summary(&summary, Path::new(path))?;
        tracing::info!("Summary written to: {}", path);
    }

    Ok(())
}
