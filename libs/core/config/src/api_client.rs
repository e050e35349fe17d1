use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for clients of the campus HTTP API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL including the `/api` prefix, without a trailing slash
    pub base_url: String,
    /// Applied to every request
    pub timeout: Duration,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl FromEnv for ApiClientConfig {
    /// - CAMPUS_API_URL: defaults to http://localhost:8080/api
    /// - CAMPUS_API_TIMEOUT_SECS: defaults to 10
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("CAMPUS_API_URL", DEFAULT_API_URL);
        let timeout_secs = env_parse_or("CAMPUS_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "CAMPUS_API_TIMEOUT_SECS".to_string(),
                details: "timeout must be greater than zero".to_string(),
            });
        }

        Ok(Self::new(base_url, Duration::from_secs(timeout_secs)))
    }
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_config_defaults() {
        temp_env::with_vars(
            [
                ("CAMPUS_API_URL", None::<&str>),
                ("CAMPUS_API_TIMEOUT_SECS", None::<&str>),
            ],
            || {
                let config = ApiClientConfig::from_env().unwrap();
                assert_eq!(config, ApiClientConfig::default());
                assert_eq!(config.base_url, "http://localhost:8080/api");
                assert_eq!(config.timeout, Duration::from_secs(10));
            },
        );
    }

    #[test]
    fn test_api_client_config_trims_trailing_slash() {
        temp_env::with_vars(
            [
                ("CAMPUS_API_URL", Some("https://campus.example.edu/api/")),
                ("CAMPUS_API_TIMEOUT_SECS", Some("3")),
            ],
            || {
                let config = ApiClientConfig::from_env().unwrap();
                assert_eq!(config.base_url, "https://campus.example.edu/api");
                assert_eq!(config.timeout, Duration::from_secs(3));
            },
        );
    }

    #[test]
    fn test_api_client_config_rejects_bad_timeout() {
        temp_env::with_var("CAMPUS_API_TIMEOUT_SECS", Some("0"), || {
            let err = ApiClientConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("CAMPUS_API_TIMEOUT_SECS"));
        });
        temp_env::with_var("CAMPUS_API_TIMEOUT_SECS", Some("ten"), || {
            assert!(ApiClientConfig::from_env().is_err());
        });
    }
}
