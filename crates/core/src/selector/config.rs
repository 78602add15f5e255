//! Selector configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for random searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Attempt budget per search.
    /// Every fetch counts, whether it misses, fails or gets rejected.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Timeout for a single catalog fetch (milliseconds).
    /// A timed out fetch consumes its attempt like any other failure.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_ms: u64,
}

fn default_max_retries() -> u32 {
    20
}

fn default_fetch_timeout() -> u64 {
    10_000 // 10 seconds
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            fetch_timeout_ms: default_fetch_timeout(),
        }
    }
}

impl SelectorConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert_eq!(config.max_retries, 20);
        assert_eq!(config.fetch_timeout_ms, 10_000);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: SelectorConfig = toml::from_str("max_retries = 5").unwrap();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.fetch_timeout_ms, 10_000);
    }
}
