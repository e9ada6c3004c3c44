use crate::config::types::{BlacklistConfig, Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_blacklist_config(&config.blacklist)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_seed_url(&config.seed_url)?;

    if let Some(timeout) = config.timeout_seconds {
        if timeout < 1 {
            return Err(ConfigError::Validation(format!(
                "timeout_seconds must be >= 1, got {}",
                timeout
            )));
        }
    }

    if let Some(user_agent) = &config.user_agent {
        validate_user_agent(user_agent)?;
    }

    Ok(())
}

/// Validates the seed URL: it must parse, use HTTP(S), and name a host
fn validate_seed_url(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use HTTP or HTTPS scheme",
            seed
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            seed
        )));
    }

    Ok(())
}

/// Validates a user agent string
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Must be sendable as an HTTP header value
    if user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user_agent contains control characters: '{}'",
            user_agent.escape_debug()
        )));
    }

    Ok(())
}

/// Validates blacklist entries
fn validate_blacklist_config(config: &BlacklistConfig) -> Result<(), ConfigError> {
    for entry in &config.entries {
        if entry.is_empty() {
            return Err(ConfigError::Validation(
                "Blacklist entries cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.links_path.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "links_path cannot be empty".to_string(),
        ));
    }

    if config.summary_path.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
