use crate::config::types::{BrowserSettings, Config, CrawlerConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_browser_settings(&config.browser)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.entry_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid entry-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "entry-url must be http(s), got '{}'",
            url.scheme()
        )));
    }

    if config.subject.is_empty() {
        return Err(ConfigError::Validation(
            "subject cannot be empty".to_string(),
        ));
    }

    // The subject value is spliced into an attribute selector
    if !config
        .subject
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "subject must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.subject
        )));
    }

    Ok(())
}

/// Validates browser launch options
fn validate_browser_settings(settings: &BrowserSettings) -> Result<(), ConfigError> {
    if settings.window_width < 320 || settings.window_height < 240 {
        return Err(ConfigError::Validation(format!(
            "window size must be at least 320x240, got {}x{}",
            settings.window_width, settings.window_height
        )));
    }
    Ok(())
}

/// Validates crawl pacing configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.element_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "element-timeout-ms must be >= 100ms, got {}ms",
            config.element_timeout_ms
        )));
    }

    if config.root_timeout_ms < config.element_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "root-timeout-ms ({}ms) must be >= element-timeout-ms ({}ms)",
            config.root_timeout_ms, config.element_timeout_ms
        )));
    }

    Ok(())
}

/// Validates output file paths
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, path) in [
        ("progress-path", &config.progress_path),
        ("snapshot-path", &config.snapshot_path),
        ("json-path", &config.json_path),
        ("transcript-path", &config.transcript_path),
        ("csv-path", &config.csv_path),
    ] {
        if path.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }
    Ok(())
}
