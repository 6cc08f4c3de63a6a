use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Upper bound on concurrent workers
const MAX_WORKERS: u32 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
///
/// Seed URLs are not checked here: a seed that is malformed or
/// out of scope is dropped with a warning when the frontier is seeded.
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_host_filter(&config.host_filter)?;

    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "seeds must contain at least one URL".to_string(),
        ));
    }

    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.fetch_timeout < 1 {
        return Err(ConfigError::Validation(
            "fetch-timeout must be at least 1 second".to_string(),
        ));
    }

    Ok(())
}

/// Validates the host substring
fn validate_host_filter(filter: &str) -> Result<(), ConfigError> {
    if filter.is_empty() {
        return Err(ConfigError::Validation(
            "host-filter cannot be empty".to_string(),
        ));
    }

    if !filter
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "host-filter '{}' must be a bare ASCII host fragment (letters, digits, '.', '-'); use the punycode form for internationalized hosts",
            filter
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.index_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "index-path cannot be empty".to_string(),
        ));
    }

    if config.content_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "content-dir cannot be empty".to_string(),
        ));
    }

    if config.frontier_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "frontier-path cannot be empty".to_string(),
        ));
    }

    if config.index_path == config.frontier_path {
        return Err(ConfigError::Validation(
            "index-path and frontier-path must be different files".to_string(),
        ));
    }

    Ok(())
}
