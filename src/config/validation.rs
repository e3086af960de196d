use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::url::Origin;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the audited site
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    Origin::parse(&config.domain)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid domain '{}': {}", config.domain, e)))?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_urls < 1 {
        return Err(ConfigError::Validation(format!(
            "max_urls must be >= 1, got {}",
            config.max_urls
        )));
    }

    for (name, secs) in [
        ("request_timeout_secs", config.request_timeout_secs),
        ("probe_timeout_secs", config.probe_timeout_secs),
    ] {
        if !(1..=300).contains(&secs) {
            return Err(ConfigError::Validation(format!(
                "{} must be between 1 and 300, got {}",
                name, secs
            )));
        }
    }

    if config.politeness_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "politeness_delay_ms must be <= 60000ms, got {}ms",
            config.politeness_delay_ms
        )));
    }

    if config.max_retries > 5 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 5, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, path) in [
        ("report_path", &config.report_path),
        ("summary_path", &config.summary_path),
        ("markdown_path", &config.markdown_path),
        ("redirects_map_path", &config.redirects_map_path),
        ("rewrite_rules_path", &config.rewrite_rules_path),
        ("canonical_fixes_path", &config.canonical_fixes_path),
    ] {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_domain() {
        let mut config = Config::default();
        config.site.domain = "ftp://example.com".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_zero_cap() {
        let mut config = Config::default();
        config.crawler.max_urls = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.crawler.request_timeout_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.crawler.probe_timeout_secs = 301;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_delay_allowed() {
        let mut config = Config::default();
        config.crawler.politeness_delay_ms = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_excessive_retries() {
        let mut config = Config::default();
        config.crawler.max_retries = 6;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_crawler_name() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "bad name!".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_output_path() {
        let mut config = Config::default();
        config.output.summary_path = "  ".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }
}
