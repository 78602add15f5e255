use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `RANDOMSONG_SEARCH__MAX_RETRIES=5`.
pub const ENV_PREFIX: &str = "RANDOMSONG_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    // Keys contain underscores, so nesting uses a double underscore.
    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[server]
port = 9000

[search]
max_retries = 5
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.search.max_retries, 5);
        assert_eq!(config.search.fetch_timeout_ms, 10_000);
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
[search]
max_retries = "many"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[server]
host = "127.0.0.1"
port = 3000

[catalog]
base_url = "http://localhost:9999/api"
rate_limit_ms = 0

[filter]
hard = true
min_bpm = 90.0
max_bpm = 180.0

[library]
path = "/games/Beat Saber/CustomLevels"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.catalog.base_url, "http://localhost:9999/api");
        assert_eq!(config.catalog.rate_limit_ms, 0);
        let filter = config.filter.unwrap();
        assert!(filter.hard);
        assert_eq!(filter.min_bpm, 90.0);
        assert_eq!(filter.min_duration, 30.0);
        assert_eq!(
            config.library.path.unwrap().to_str(),
            Some("/games/Beat Saber/CustomLevels")
        );
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[search]
max_retries = 5
"#,
            )?;
            jail.set_env("RANDOMSONG_SEARCH__MAX_RETRIES", "9");
            jail.set_env("RANDOMSONG_FILTER__MIN_RATING", "0.5");

            let config = load_config(Path::new("config.toml"))
                .map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(config.search.max_retries, 9);
            assert_eq!(config.filter.map(|f| f.min_rating), Some(0.5));
            Ok(())
        });
    }
}
