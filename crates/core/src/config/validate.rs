use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Search budget and fetch timeout are positive
/// - Fetch timeout exceeds the catalog request spacing
/// - Catalog base URL is set
/// - Filter ranges are ordered and numeric bounds are sane
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Search validation
    if config.search.max_retries == 0 {
        return Err(ConfigError::ValidationError(
            "search.max_retries must be at least 1".to_string(),
        ));
    }
    if config.search.fetch_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "search.fetch_timeout_ms cannot be 0".to_string(),
        ));
    }

    // Every fetch waits out the client's request spacing inside its timeout.
    if config.search.fetch_timeout_ms <= config.catalog.rate_limit_ms {
        return Err(ConfigError::ValidationError(format!(
            "search.fetch_timeout_ms ({}) must exceed catalog.rate_limit_ms ({})",
            config.search.fetch_timeout_ms, config.catalog.rate_limit_ms
        )));
    }

    // Catalog validation
    if config.catalog.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.base_url cannot be empty".to_string(),
        ));
    }

    if let Some(filter) = &config.filter {
        filter.validate().map_err(ConfigError::ValidationError)?;
    }

    Ok(())
}
