use crate::config::types::AuditConfig;
use crate::ConfigError;
use url::Url;

/// Validates a loaded configuration
///
/// Checks performed:
/// - Target URL parses and uses http/https
/// - Login, when enabled, carries a login URL
/// - Crawler budgets are non-zero
/// - Extra exclusion patterns compile as regular expressions
/// - Audit concurrency is non-zero
pub fn validate(config: &AuditConfig) -> Result<(), ConfigError> {
    validate_target_url(&config.target.url)?;

    if config.login.enabled && config.login.login_url.is_none() {
        return Err(ConfigError::Validation(
            "login.enabled requires login.login-url".to_string(),
        ));
    }

    if let Some(login_url) = &config.login.login_url {
        validate_target_url(login_url)?;
    }

    if config.crawler.max_depth == 0 {
        return Err(ConfigError::Validation(
            "crawler.max-depth must be at least 1".to_string(),
        ));
    }

    if config.crawler.max_pages == 0 {
        return Err(ConfigError::Validation(
            "crawler.max-pages must be at least 1".to_string(),
        ));
    }

    for pattern in &config.crawler.exclude_patterns {
        regex::Regex::new(pattern)
            .map_err(|e| ConfigError::InvalidPattern(format!("{pattern}: {e}")))?;
    }

    if config.audit.concurrency == 0 {
        return Err(ConfigError::Validation(
            "audit.concurrency must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_target_url(url_str: &str) -> Result<(), ConfigError> {
    let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl(format!("{url_str}: {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{url_str}: only http and https are supported"
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!("{url_str}: missing host")));
    }

    Ok(())
}
