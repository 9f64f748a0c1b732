use crate::config::types::{BrowserConfig, Config, OutputConfig, SourceConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_browser_config(&config.browser)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the source site description
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.post_path_marker.is_empty() {
        return Err(ConfigError::Validation(
            "post_path_marker cannot be empty".to_string(),
        ));
    }

    for (name, selector) in [
        ("featured_selector", &config.featured_selector),
        ("recent_selector", &config.recent_selector),
        ("title_selector", &config.title_selector),
        ("content_selector", &config.content_selector),
    ] {
        validate_selector(name, selector)?;
    }

    Ok(())
}

/// Validates a CSS selector string
fn validate_selector(name: &str, selector: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }

    Selector::parse(selector).map_err(|e| {
        ConfigError::Validation(format!("{} '{}' is not valid CSS: {:?}", name, selector, e))
    })?;

    Ok(())
}

/// Validates rendering timeouts
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.navigation_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_ms must be >= 100ms, got {}ms",
            config.navigation_timeout_ms
        )));
    }

    if config.selector_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "selector_timeout_ms must be >= 100ms, got {}ms",
            config.selector_timeout_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.error_log_path.is_empty() {
        return Err(ConfigError::Validation(
            "error_log_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
