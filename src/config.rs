//! Configuration management for the Fleet MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is picked up if present; dotenvy never writes to stdout, which MCP
//! uses for communication.

use crate::error::{ConfigError, ConfigResult};
use crate::formatter::find_profile;
use std::env;

/// Longest inventory snapshot lifetime accepted from the environment: one week.
pub const MAX_CACHE_TTL_MINUTES: u64 = 7 * 24 * 60;

/// Configuration for the Fleet MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend REST base URL
    pub fleet_api_url: String,

    /// Backend API key, sent as `apikey` and bearer token
    pub fleet_api_key: String,

    /// Cache TTL in minutes for the inventory snapshot (default: 30)
    pub cache_ttl_minutes: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Maximum number of fuzzy match results to return (default: 5)
    pub max_match_results: usize,

    /// Fuzzy match confidence threshold (0-100, default: 30)
    pub match_confidence_threshold: u8,

    /// Phone profile used when a form has not picked one (default: "IN")
    pub default_country_code: String,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `FLEET_API_BASE_URL`: Base URL of the backend REST endpoint
    /// - `FLEET_API_KEY`: API key for authentication
    ///
    /// Optional environment variables:
    /// - `FLEET_CACHE_TTL_MINUTES`: Cache TTL in minutes (default: 30)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MAX_MATCH_RESULTS`: Max fuzzy match results (default: 5)
    /// - `MATCH_CONFIDENCE_THRESHOLD`: Min confidence score (default: 30)
    /// - `DEFAULT_COUNTRY_CODE`: Default phone profile (default: "IN")
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let fleet_api_url = env::var("FLEET_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("FLEET_API_BASE_URL".to_string()))?;

        let fleet_api_key = env::var("FLEET_API_KEY")
            .map_err(|_| ConfigError::MissingVar("FLEET_API_KEY".to_string()))?;

        if !fleet_api_url.starts_with("http://") && !fleet_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "FLEET_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if fleet_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "FLEET_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let cache_ttl_minutes = Self::parse_env("FLEET_CACHE_TTL_MINUTES", 30u64)?;
        if cache_ttl_minutes > MAX_CACHE_TTL_MINUTES {
            return Err(ConfigError::InvalidValue {
                var: "FLEET_CACHE_TTL_MINUTES".to_string(),
                reason: format!("Must be at most {} (one week)", MAX_CACHE_TTL_MINUTES),
            });
        }
        let request_timeout = Self::parse_env("REQUEST_TIMEOUT", 10u64)?;
        let max_match_results = Self::parse_env("MAX_MATCH_RESULTS", 5usize)?;
        let match_confidence_threshold = Self::parse_env("MATCH_CONFIDENCE_THRESHOLD", 30u8)?;

        if match_confidence_threshold > 100 {
            return Err(ConfigError::InvalidValue {
                var: "MATCH_CONFIDENCE_THRESHOLD".to_string(),
                reason: "Must be between 0 and 100".to_string(),
            });
        }

        let default_country_code =
            env::var("DEFAULT_COUNTRY_CODE").unwrap_or_else(|_| "IN".to_string());
        let default_country_code = match find_profile(&default_country_code) {
            Some(profile) => profile.iso_code.to_string(),
            None => {
                return Err(ConfigError::InvalidValue {
                    var: "DEFAULT_COUNTRY_CODE".to_string(),
                    reason: format!("No phone profile for country code: {}", default_country_code),
                })
            }
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            fleet_api_url,
            fleet_api_key,
            cache_ttl_minutes,
            request_timeout,
            max_match_results,
            match_confidence_threshold,
            default_country_code,
            log_level,
        })
    }

    /// Parse an environment variable with a default value.
    fn parse_env<T>(var_name: &str, default: T) -> ConfigResult<T>
    where
        T: std::str::FromStr,
    {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a non-negative number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Cache TTL converted to seconds.
    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_minutes.saturating_mul(60)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fleet_api_url: String::new(),
            fleet_api_key: String::new(),
            cache_ttl_minutes: 30,
            request_timeout: 10,
            max_match_results: 5,
            match_confidence_threshold: 30,
            default_country_code: "IN".to_string(),
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Sets env vars and removes them again on drop
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_minutes, 30);
        assert_eq!(config.cache_ttl_secs(), 1800);
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.max_match_results, 5);
        assert_eq!(config.default_country_code, "IN");
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("FLEET_API_BASE_URL", "not-a-url");
        guard.set("FLEET_API_KEY", "test-key");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "FLEET_API_BASE_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_api_key() {
        let mut guard = EnvGuard::new();
        guard.set("FLEET_API_BASE_URL", "https://fleet.example.com/rest/v1");
        guard.set("FLEET_API_KEY", "   ");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "FLEET_API_KEY"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("FLEET_API_BASE_URL", "https://fleet.example.com/rest/v1");
        guard.set("FLEET_API_KEY", "test-key-123");
        guard.set("FLEET_CACHE_TTL_MINUTES", "60");
        guard.set("MAX_MATCH_RESULTS", "10");
        guard.set("DEFAULT_COUNTRY_CODE", "ae");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.fleet_api_url, "https://fleet.example.com/rest/v1");
        assert_eq!(config.fleet_api_key, "test-key-123");
        assert_eq!(config.cache_ttl_minutes, 60);
        assert_eq!(config.max_match_results, 10);
        assert_eq!(config.default_country_code, "AE");
    }

    #[test]
    #[serial]
    fn test_config_unknown_country() {
        let mut guard = EnvGuard::new();
        guard.set("FLEET_API_BASE_URL", "https://fleet.example.com/rest/v1");
        guard.set("FLEET_API_KEY", "test-key");
        guard.set("DEFAULT_COUNTRY_CODE", "XX");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "DEFAULT_COUNTRY_CODE"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_oversized_cache_ttl() {
        let mut guard = EnvGuard::new();
        guard.set("FLEET_API_BASE_URL", "https://fleet.example.com/rest/v1");
        guard.set("FLEET_API_KEY", "test-key");
        guard.set("FLEET_CACHE_TTL_MINUTES", &u64::MAX.to_string());

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "FLEET_CACHE_TTL_MINUTES"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }

        guard.set("FLEET_CACHE_TTL_MINUTES", &MAX_CACHE_TTL_MINUTES.to_string());
        let config = Config::from_env().expect("one week is accepted");
        assert_eq!(config.cache_ttl_secs(), MAX_CACHE_TTL_MINUTES * 60);
    }

    #[test]
    fn test_cache_ttl_secs_saturates() {
        let config = Config {
            cache_ttl_minutes: u64::MAX,
            ..Config::default()
        };
        assert_eq!(config.cache_ttl_secs(), u64::MAX);
    }

    #[test]
    #[serial]
    fn test_config_invalid_confidence_threshold() {
        let mut guard = EnvGuard::new();
        guard.set("FLEET_API_BASE_URL", "https://fleet.example.com/rest/v1");
        guard.set("FLEET_API_KEY", "test-key");
        guard.set("MATCH_CONFIDENCE_THRESHOLD", "150");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "MATCH_CONFIDENCE_THRESHOLD")
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_FLEET_U64", "42");
        guard.set("TEST_FLEET_BAD", "not-a-number");

        assert_eq!(Config::parse_env("TEST_FLEET_U64", 10u64).unwrap(), 42);
        assert_eq!(Config::parse_env("TEST_FLEET_MISSING", 10u64).unwrap(), 10);
        assert!(Config::parse_env("TEST_FLEET_BAD", 10u64).is_err());
    }
}
