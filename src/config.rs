//! Configuration management for the interview agent client
//!
//! Configuration is layered: defaults, then an optional YAML file, then
//! environment variables, then CLI overrides.

use crate::error::{ApiResult, ClientError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the service base URL
pub const API_URL_ENV: &str = "INTERVIEW_AGENT_API_URL";

/// Environment variable overriding the request timeout
pub const TIMEOUT_ENV: &str = "INTERVIEW_AGENT_TIMEOUT_SECONDS";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Interview service connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Interview presentation settings
    #[serde(default)]
    pub interview: InterviewConfig,
}

/// Interview service connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the interview service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Interview presentation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterviewConfig {
    /// Render the progress bar above each question
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

fn default_show_progress() -> bool {
    true
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            show_progress: default_show_progress(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> ApiResult<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> ApiResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        tracing::debug!("Loaded config from {}", path);
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var(API_URL_ENV) {
            if !base_url.trim().is_empty() {
                tracing::debug!(base_url = %base_url, "Env override: {}", API_URL_ENV);
                self.api.base_url = base_url;
            }
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid {}: {}", TIMEOUT_ENV, timeout);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an absolute http(s) URL or the
    /// timeout is zero
    pub fn validate(&self) -> ApiResult<()> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(ClientError::Config("api.base_url cannot be empty".to_string()));
        }

        let parsed = url::Url::parse(base)
            .map_err(|e| ClientError::Config(format!("Invalid api.base_url '{}': {}", base, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "api.base_url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if self.api.timeout_seconds == 0 {
            return Err(ClientError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use serial_test::serial;

    fn cli_with_url(api_url: Option<&str>) -> Cli {
        Cli {
            config: None,
            api_url: api_url.map(str::to_string),
            verbose: false,
            command: Commands::Agents { json: false },
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_seconds, 120);
        assert!(config.interview.show_progress);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_url() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_scheme() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_config_validation_relative_url() {
        let mut config = Config::default();
        config.api.base_url = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
api:
  base_url: https://agents.example.com
  timeout_seconds: 30
interview:
  show_progress: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "https://agents.example.com");
        assert_eq!(config.api.timeout_seconds, 30);
        assert!(!config.interview.show_progress);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("api:\n  timeout_seconds: 5\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_seconds, 5);
        assert!(config.interview.show_progress);
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        std::env::remove_var(API_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
        let config = Config::load("nonexistent.yaml", &cli_with_url(None)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_load_reads_file() {
        std::env::remove_var(API_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api:\n  base_url: http://10.0.0.5:9000\n").unwrap();

        let config = Config::load(path.to_str().unwrap(), &cli_with_url(None)).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
    }

    #[test]
    #[serial]
    fn test_load_invalid_yaml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api: [not, a, map").unwrap();

        let err = Config::load(path.to_str().unwrap(), &cli_with_url(None)).unwrap_err();
        assert!(matches!(err, ClientError::Yaml(_)));
    }

    #[test]
    #[serial]
    fn test_load_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = Config::load(dir.path().to_str().unwrap(), &cli_with_url(None)).unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_and_cli_overrides_env() {
        std::env::set_var(API_URL_ENV, "http://env-host:8000");
        std::env::set_var(TIMEOUT_ENV, "15");

        let config = Config::load("nonexistent.yaml", &cli_with_url(None)).unwrap();
        assert_eq!(config.api.base_url, "http://env-host:8000");
        assert_eq!(config.api.timeout_seconds, 15);

        let config =
            Config::load("nonexistent.yaml", &cli_with_url(Some("http://cli-host:1"))).unwrap();
        assert_eq!(config.api.base_url, "http://cli-host:1");

        std::env::remove_var(API_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_env_is_ignored() {
        std::env::remove_var(API_URL_ENV);
        std::env::set_var(TIMEOUT_ENV, "soon");
        let config = Config::load("nonexistent.yaml", &cli_with_url(None)).unwrap();
        assert_eq!(config.api.timeout_seconds, 120);
        std::env::remove_var(TIMEOUT_ENV);
    }
}
