//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// AI backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Backend type: "ollama", "anthropic", or "none"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Base URL for the AI service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Env var holding the API key for remote backends
    #[serde(default = "default_ai_key_env")]
    pub api_key_env: String,

    /// Timeout in seconds
    #[serde(default = "default_ai_timeout")]
    pub timeout_seconds: u64,
}

fn default_backend() -> String {
    "ollama".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_ai_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_ai_timeout() -> u64 {
    120
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_ai_key_env(),
            timeout_seconds: default_ai_timeout(),
        }
    }
}

/// GRID telemetry source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Env var holding the GRID API key
    #[serde(default = "default_grid_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_central_data_url")]
    pub central_data_url: String,

    #[serde(default = "default_file_download_url")]
    pub file_download_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_grid_timeout")]
    pub timeout_seconds: u64,
}

fn default_grid_key_env() -> String {
    "GRID_API_KEY".to_string()
}

fn default_central_data_url() -> String {
    "https://api.grid.gg/central-data/graphql".to_string()
}

fn default_file_download_url() -> String {
    "https://api.grid.gg/file-download/end-state/grid/series/".to_string()
}

fn default_grid_timeout() -> u64 {
    30
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_grid_key_env(),
            central_data_url: default_central_data_url(),
            file_download_url: default_file_download_url(),
            timeout_seconds: default_grid_timeout(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub ai: AiConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            grid: GridConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "GRID timeout must be greater than 0".to_string(),
            ));
        }

        if self.ai.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "AI timeout must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        url::Url::parse(&self.grid.central_data_url).map_err(|e| {
            ConfigError::ValidationError(format!("invalid central_data_url: {e}"))
        })?;
        url::Url::parse(&self.grid.file_download_url).map_err(|e| {
            ConfigError::ValidationError(format!("invalid file_download_url: {e}"))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.grid.api_key_env, "GRID_API_KEY");
    }

    #[test]
    fn test_empty_toml_gets_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.grid.timeout_seconds, 30);
        assert_eq!(config.ai.backend, "ollama");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config: AppConfig = toml::from_str("").unwrap();
        config.grid.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config: AppConfig = toml::from_str("").unwrap();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config: AppConfig = toml::from_str("").unwrap();
        config.grid.central_data_url = "not a url".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let config: AppConfig = toml::from_str("").unwrap();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.grid.central_data_url, parsed.grid.central_data_url);
    }

    #[test]
    fn test_partial_override() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [grid]
            timeout_seconds = 10
        "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.grid.timeout_seconds, 10);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
